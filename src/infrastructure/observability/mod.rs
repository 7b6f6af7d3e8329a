//! Push-based observability for Cassandra
//!
//! Metrics are only ever pushed out as structured JSON on stdout. There is
//! no HTTP endpoint and nothing listens for requests.

pub mod metrics;
pub mod reporter;

pub use metrics::Metrics;
pub use reporter::MetricsReporter;
