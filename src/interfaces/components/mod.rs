pub mod card;
pub mod risk_chart;

pub use card::Card;
pub use risk_chart::render_risk_chart;
