pub mod analyzer;
pub mod client;
pub mod fetcher;
pub mod session;

pub use analyzer::MarketAnalyzer;
pub use client::{DashboardClient, DashboardCommand, DashboardEvent};
pub use fetcher::{FetchEntry, FetchOutcome, FetchReport, MarketDataFetcher};
pub use session::DashboardSession;
