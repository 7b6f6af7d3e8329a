pub mod assessment;

pub use assessment::{
    evaluate, RiskAssessment, RiskColor, RiskTier, HIGH_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD,
};
