use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound (inclusive) of the MEDIUM tier
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.3;
/// Lower bound (inclusive) of the HIGH tier
pub const HIGH_RISK_THRESHOLD: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Half-open brackets, lower bound inclusive. NaN falls through to High.
    pub fn from_probability(probability: f64) -> Self {
        if probability < MEDIUM_RISK_THRESHOLD {
            Self::Low
        } else if probability < HIGH_RISK_THRESHOLD {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            Self::Low => "Consider maintaining full market exposure",
            Self::Medium => "Consider reducing position size to 50%",
            Self::High => "Consider moving to cash",
        }
    }

    pub fn color(&self) -> RiskColor {
        match self {
            Self::Low => RiskColor::Green,
            Self::Medium => RiskColor::Yellow,
            Self::High => RiskColor::Red,
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskColor {
    Green,
    Yellow,
    Red,
}

impl RiskColor {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }

    pub fn color_hex(&self) -> &'static str {
        match self {
            Self::Green => "#00E676",
            Self::Yellow => "#FFD43B",
            Self::Red => "#FF1744",
        }
    }
}

impl fmt::Display for RiskColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Outcome of one evaluation request. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub probability: f64,
    pub tier: RiskTier,
    pub recommendation: String,
    pub color: RiskColor,
    pub assessed_at: DateTime<Utc>,
}

impl RiskAssessment {
    /// Probability as a percentage with one decimal, e.g. "45.0%"
    pub fn probability_pct(&self) -> String {
        format!("{:.1}%", self.probability * 100.0)
    }
}

/// Map a crash probability to its tier, recommendation and color.
///
/// Inputs outside [0, 1] are clamped first. NaN is classified HIGH and
/// reported as 1.0.
pub fn evaluate(probability: f64) -> RiskAssessment {
    let probability = if probability.is_nan() {
        1.0
    } else {
        probability.clamp(0.0, 1.0)
    };
    let tier = RiskTier::from_probability(probability);

    RiskAssessment {
        probability,
        tier,
        recommendation: tier.recommendation().to_string(),
        color: tier.color(),
        assessed_at: Utc::now(),
    }
}
