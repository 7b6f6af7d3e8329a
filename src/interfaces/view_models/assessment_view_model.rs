use crate::domain::indicators::ValueSource;
use crate::domain::risk::RiskAssessment;
use crate::interfaces::design_system::DesignSystem;
use eframe::egui;

/// Display-ready form of a `RiskAssessment`
pub struct AssessmentViewModel {
    pub probability: f64,
    pub probability_text: String,
    pub tier_text: &'static str,
    pub recommendation: String,
    pub color: egui::Color32,
}

impl AssessmentViewModel {
    pub fn from_assessment(assessment: &RiskAssessment) -> Self {
        Self {
            probability: assessment.probability,
            probability_text: assessment.probability_pct(),
            tier_text: assessment.tier.label(),
            recommendation: assessment.recommendation.clone(),
            color: DesignSystem::risk_color(assessment.color),
        }
    }
}

/// Small tag next to each indicator input
pub struct SourceBadge {
    pub text: String,
    pub color: egui::Color32,
    pub tooltip: &'static str,
}

impl SourceBadge {
    pub fn for_source(source: ValueSource) -> Self {
        let text = match source {
            ValueSource::FetchFailed => format!("⚠ {}", source),
            _ => source.to_string(),
        };
        let tooltip = match source {
            ValueSource::Default => "Fallback value",
            ValueSource::Fetched => "Latest close from the quote source",
            ValueSource::FetchFailed => "Fetch failed, 0.0 is used",
            ValueSource::Manual => "Edited by hand",
        };
        Self {
            text,
            color: DesignSystem::source_color(source),
            tooltip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::risk::evaluate;

    #[test]
    fn test_view_model_formats_assessment() {
        let vm = AssessmentViewModel::from_assessment(&evaluate(0.72));
        assert_eq!(vm.probability_text, "72.0%");
        assert_eq!(vm.tier_text, "HIGH");
        assert_eq!(vm.recommendation, "Consider moving to cash");
        assert_eq!(vm.color, DesignSystem::RISK_HIGH);
    }

    #[test]
    fn test_failed_fetch_badge_is_flagged() {
        let badge = SourceBadge::for_source(ValueSource::FetchFailed);
        assert!(badge.text.starts_with('⚠'));
        assert_eq!(badge.color, DesignSystem::WARNING);
        assert_eq!(SourceBadge::for_source(ValueSource::Manual).text, "manual");
    }
}
