//! Plain-text rendering shared by the headless CLI

use crate::application::fetcher::{FetchOutcome, FetchReport};
use crate::domain::indicators::GroupAssignment;
use crate::domain::risk::{HIGH_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD, RiskAssessment};
use std::fmt::Write;

pub const BAR_WIDTH: usize = 40;

/// `[####|###.|......]`: filled cells up to `probability`, `|` at the tier bounds
pub fn render_bar(probability: f64, width: usize) -> String {
    let p = if probability.is_nan() {
        1.0
    } else {
        probability.clamp(0.0, 1.0)
    };
    let filled = (p * width as f64).round() as usize;
    let medium_at = (MEDIUM_RISK_THRESHOLD * width as f64).round() as usize;
    let high_at = (HIGH_RISK_THRESHOLD * width as f64).round() as usize;

    let mut bar = String::with_capacity(width + 4);
    bar.push('[');
    for i in 0..width {
        if i == medium_at || i == high_at {
            bar.push('|');
        }
        bar.push(if i < filled { '#' } else { '.' });
    }
    bar.push(']');
    bar
}

pub fn render_assessment(assessment: &RiskAssessment, degraded: &[&str]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Crash probability: {}", assessment.probability_pct());
    let _ = writeln!(
        out,
        "Risk level:        {} ({})",
        assessment.tier, assessment.color
    );
    let _ = writeln!(out, "Recommendation:    {}", assessment.recommendation);
    let _ = writeln!(
        out,
        "{}  low < {:.1} <= medium < {:.1} <= high",
        render_bar(assessment.probability, BAR_WIDTH),
        MEDIUM_RISK_THRESHOLD,
        HIGH_RISK_THRESHOLD
    );
    if !degraded.is_empty() {
        let _ = writeln!(
            out,
            "Warning: fetch failed for {}; 0.0 was used",
            degraded.join(", ")
        );
    }
    out
}

pub fn render_groups(assignment: &GroupAssignment) -> String {
    let mut out = String::new();
    for (group, names) in assignment.sections() {
        let _ = writeln!(out, "{} ({})", group.title(), names.len());
        for name in names {
            let _ = writeln!(out, "  {}", name);
        }
    }
    if !assignment.unassigned().is_empty() {
        let _ = writeln!(out, "Other Indicators ({})", assignment.unassigned().len());
        for name in assignment.unassigned() {
            let _ = writeln!(out, "  {}", name);
        }
    }
    out
}

pub fn render_fetch(report: &FetchReport) -> String {
    let mut out = String::new();
    for entry in report.entries() {
        match &entry.outcome {
            FetchOutcome::Fetched { value } => {
                let _ = writeln!(out, "{:<10} {:<10} {:>12.4}", entry.name, entry.symbol, value);
            }
            FetchOutcome::Failed { reason } => {
                let _ = writeln!(
                    out,
                    "{:<10} {:<10} {:>12.4}  FAILED: {}",
                    entry.name, entry.symbol, 0.0, reason
                );
            }
        }
    }
    let _ = writeln!(
        out,
        "{} fetched, {} failed",
        report.fetched_count(),
        report.failed_count()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fetcher::FetchEntry;
    use crate::domain::indicators::classify;
    use crate::domain::risk::evaluate;

    #[test]
    fn test_bar_markers() {
        assert_eq!(render_bar(0.0, 10), "[...|...|....]");
        assert_eq!(render_bar(0.45, 10), "[###|##.|....]");
        assert_eq!(render_bar(1.0, 10), "[###|###|####]");
    }

    #[test]
    fn test_bar_clamps_out_of_range() {
        assert_eq!(render_bar(1.7, 10), render_bar(1.0, 10));
        assert_eq!(render_bar(-0.2, 10), render_bar(0.0, 10));
    }

    #[test]
    fn test_assessment_text() {
        let text = render_assessment(&evaluate(0.45), &["DXY"]);
        assert!(text.contains("Crash probability: 45.0%"));
        assert!(text.contains("MEDIUM (yellow)"));
        assert!(text.contains("Consider reducing position size to 50%"));
        assert!(text.contains("fetch failed for DXY"));
    }

    #[test]
    fn test_groups_text_lists_other_indicators() {
        let text = render_groups(&classify(&["VIX", "FOO"]));
        assert!(text.contains("Market Indices (1)\n  VIX"));
        assert!(text.contains("Other Indicators (1)\n  FOO"));
    }

    #[test]
    fn test_fetch_text_marks_failures() {
        let report = FetchReport::new(vec![FetchEntry {
            name: "JPY".to_string(),
            symbol: "JPY=X".to_string(),
            outcome: FetchOutcome::Failed {
                reason: "no data".to_string(),
            },
        }]);
        let text = render_fetch(&report);
        assert!(text.contains("FAILED: no data"));
        assert!(text.contains("0 fetched, 1 failed"));
    }
}
