use cassandra::application::client::DashboardClient;
use cassandra::application::fetcher::MarketDataFetcher;
use cassandra::application::{DashboardSession, MarketAnalyzer};
use cassandra::config::Config;
use cassandra::domain::indicators::default_symbol_map;
use cassandra::infrastructure::observability::{Metrics, MetricsReporter};
use cassandra::infrastructure::{YahooQuoteProvider, load_model};
use cassandra::interfaces::dashboard::CassandraApp;
use std::sync::Arc;
use tracing::{Level, error, info};
use tracing_subscriber::prelude::*;

// A writer that sends logs to the UI via a crossbeam channel
struct ChannelWriter {
    sender: crossbeam_channel::Sender<String>,
}

impl std::io::Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let msg = String::from_utf8_lossy(buf).to_string();
        let _ = self.sender.try_send(msg);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

// Cloneable wrapper for MakeWriter
#[derive(Clone)]
struct ChannelWriterFactory {
    sender: crossbeam_channel::Sender<String>,
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for ChannelWriterFactory {
    type Writer = ChannelWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ChannelWriter {
            sender: self.sender.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Stdout + UI log panel
    let (log_tx, log_rx) = crossbeam_channel::unbounded();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();

    let ui_layer = tracing_subscriber::fmt::layer()
        .with_writer(ChannelWriterFactory { sender: log_tx })
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .with(ui_layer)
        .init();

    info!("Starting Cassandra dashboard...");

    let config = Config::from_env()?;

    // The session cannot run without a model
    let model = match load_model(&config.model_path) {
        Ok(model) => model,
        Err(e) => {
            error!("Cannot start without a model: {}", e);
            return Err(e.into());
        }
    };

    let metrics = Metrics::new()?;
    let reporter = config
        .metrics_enabled
        .then(|| MetricsReporter::new(metrics.clone()));

    let analyzer = MarketAnalyzer::new(model).with_metrics(metrics.clone());
    let provider = YahooQuoteProvider::new(
        config.quote_base_url.clone(),
        config.fetch_timeout_secs,
        config.fetch_max_retries,
    );
    let fetcher = Arc::new(MarketDataFetcher::new(Arc::new(provider)).with_metrics(metrics));

    let client = DashboardClient::spawn(fetcher, log_rx)?;
    let session = DashboardSession::new(analyzer, default_symbol_map());
    let app = CassandraApp::new(session, client, config.fetch_on_startup);

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Cassandra - Market Crash Risk"),
        ..Default::default()
    };

    eframe::run_native(
        "Cassandra",
        native_options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("Eframe error: {}", e))?;

    if let Some(reporter) = reporter {
        reporter.report();
    }
    info!("Dashboard closed");

    Ok(())
}
