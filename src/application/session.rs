use crate::application::analyzer::MarketAnalyzer;
use crate::application::fetcher::FetchReport;
use crate::domain::indicators::{GroupAssignment, IndicatorValues};
use crate::domain::risk::RiskAssessment;
use std::collections::VecDeque;
use tracing::{error, info};

const MAX_LOG_LINES: usize = 500;

/// State behind one dashboard window.
///
/// Only one action runs at a time: while a fetch is in flight, neither a
/// second fetch nor an analysis is accepted.
pub struct DashboardSession {
    analyzer: MarketAnalyzer,
    groups: GroupAssignment,
    values: IndicatorValues,
    symbol_map: Vec<(String, String)>,
    assessment: Option<RiskAssessment>,
    last_fetch: Option<FetchReport>,
    last_error: Option<String>,
    fetch_in_flight: bool,
    logs: VecDeque<String>,
}

impl DashboardSession {
    pub fn new(analyzer: MarketAnalyzer, symbol_map: Vec<(String, String)>) -> Self {
        let groups = analyzer.groups();
        let values = analyzer.default_values();
        Self {
            analyzer,
            groups,
            values,
            symbol_map,
            assessment: None,
            last_fetch: None,
            last_error: None,
            fetch_in_flight: false,
            logs: VecDeque::new(),
        }
    }

    pub fn analyzer(&self) -> &MarketAnalyzer {
        &self.analyzer
    }

    pub fn groups(&self) -> &GroupAssignment {
        &self.groups
    }

    pub fn values(&self) -> &IndicatorValues {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut IndicatorValues {
        &mut self.values
    }

    pub fn assessment(&self) -> Option<&RiskAssessment> {
        self.assessment.as_ref()
    }

    pub fn last_fetch(&self) -> Option<&FetchReport> {
        self.last_fetch.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.fetch_in_flight
    }

    /// Mark a fetch as started and hand back the symbols to request.
    /// Returns None when one is already running.
    pub fn begin_fetch(&mut self) -> Option<Vec<(String, String)>> {
        if self.fetch_in_flight {
            return None;
        }
        self.fetch_in_flight = true;
        Some(self.symbol_map.clone())
    }

    /// Abort a fetch that could not be dispatched
    pub fn cancel_fetch(&mut self, reason: impl Into<String>) {
        self.fetch_in_flight = false;
        self.last_error = Some(reason.into());
    }

    pub fn complete_fetch(&mut self, report: FetchReport) {
        let applied = report.apply_to(&mut self.values);
        info!(
            "Applied {} fetched values ({} failed)",
            applied,
            report.failed_count()
        );
        self.last_error = None;
        self.last_fetch = Some(report);
        self.fetch_in_flight = false;
    }

    /// Evaluate the current values. Returns false if nothing was run.
    pub fn analyze(&mut self) -> bool {
        if self.fetch_in_flight {
            return false;
        }
        match self.analyzer.analyze(&self.values) {
            Ok(assessment) => {
                self.assessment = Some(assessment);
                self.last_error = None;
            }
            Err(e) => {
                error!("Analysis failed: {:#}", e);
                self.assessment = None;
                self.last_error = Some(format!("{:#}", e));
            }
        }
        true
    }

    pub fn reset_values(&mut self) {
        self.values.reset();
        self.assessment = None;
    }

    pub fn push_log(&mut self, line: String) {
        if self.logs.len() == MAX_LOG_LINES {
            self.logs.pop_front();
        }
        self.logs.push_back(line);
    }

    pub fn logs(&self) -> impl Iterator<Item = &str> {
        self.logs.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fetcher::{FetchEntry, FetchOutcome};
    use crate::domain::indicators::ValueSource;
    use crate::domain::risk::RiskTier;
    use crate::infrastructure::mock::{FailingModel, FixedModel};
    use std::sync::Arc;

    fn session(probability: f64) -> DashboardSession {
        let model = FixedModel::new(&["VIX", "JPY", "CUSTOM"], probability);
        DashboardSession::new(
            MarketAnalyzer::new(Arc::new(model)),
            vec![("VIX".to_string(), "^VIX".to_string())],
        )
    }

    #[test]
    fn test_new_session_seeds_defaults() {
        let session = session(0.1);
        assert_eq!(session.values().value("VIX"), 17.57);
        assert_eq!(session.groups().unassigned(), ["CUSTOM"]);
        assert!(session.assessment().is_none());
    }

    #[test]
    fn test_single_fetch_at_a_time() {
        let mut session = session(0.1);
        assert!(session.begin_fetch().is_some());
        assert!(session.begin_fetch().is_none());
        assert!(!session.analyze());

        session.complete_fetch(FetchReport::new(vec![FetchEntry {
            name: "VIX".to_string(),
            symbol: "^VIX".to_string(),
            outcome: FetchOutcome::Failed {
                reason: "timeout".to_string(),
            },
        }]));

        assert!(!session.is_busy());
        let vix = session.values().get("VIX").unwrap();
        assert_eq!((vix.value, vix.source), (0.0, ValueSource::FetchFailed));
        assert!(session.analyze());
    }

    #[test]
    fn test_analyze_stores_assessment() {
        let mut session = session(0.62);
        assert!(session.analyze());
        assert_eq!(session.assessment().map(|a| a.tier), Some(RiskTier::High));

        session.reset_values();
        assert!(session.assessment().is_none());
    }

    #[test]
    fn test_failed_analysis_clears_previous_assessment() {
        let model = Arc::new(FailingModel::new(&["VIX", "JPY"], 0.2));
        model.set_failing(false);
        let mut session = DashboardSession::new(
            MarketAnalyzer::new(model.clone()),
            vec![("VIX".to_string(), "^VIX".to_string())],
        );

        assert!(session.analyze());
        assert_eq!(session.assessment().map(|a| a.tier), Some(RiskTier::Low));
        assert!(session.last_error().is_none());

        model.set_failing(true);
        assert!(session.analyze());
        assert!(session.assessment().is_none());
        let message = session.last_error().unwrap();
        assert!(message.contains("Failing"));
        assert!(message.contains("backend unavailable"));

        model.set_failing(false);
        assert!(session.analyze());
        assert!(session.assessment().is_some());
        assert!(session.last_error().is_none());
    }

    #[test]
    fn test_log_buffer_is_bounded() {
        let mut session = session(0.1);
        for i in 0..(MAX_LOG_LINES + 5) {
            session.push_log(format!("line {}", i));
        }
        assert_eq!(session.logs().count(), MAX_LOG_LINES);
        assert_eq!(session.logs().next(), Some("line 5"));
    }
}
