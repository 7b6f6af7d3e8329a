pub mod http_client_factory;
pub mod mock;
pub mod model;
pub mod observability;
pub mod snapshot;
pub mod yahoo;

pub use http_client_factory::HttpClientFactory;
pub use model::load_model;
pub use yahoo::YahooQuoteProvider;
