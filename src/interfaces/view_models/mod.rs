pub mod assessment_view_model;

pub use assessment_view_model::{AssessmentViewModel, SourceBadge};
