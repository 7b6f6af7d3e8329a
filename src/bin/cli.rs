//! Cassandra CLI - headless crash risk assessment
//!
//! Runs the same model and fetch pipeline as the dashboard, without a GUI.
//!
//! # Usage
//! ```sh
//! cargo run --bin cassandra-cli -- assess --fetch --set VIX=32.5
//! cargo run --bin cassandra-cli -- features
//! ```
//!
//! # Environment Variables
//! - `MODEL_PATH` - Model artifact (overridden by `--model`)
//! - `LOG_JSON` - JSON log lines on stderr (default: false)
//! - `METRICS_ENABLED` - Print a `METRICS_JSON:` snapshot at exit (default: true)

use anyhow::{Context, Result};
use cassandra::application::{MarketAnalyzer, MarketDataFetcher};
use cassandra::config::Config;
use cassandra::domain::indicators::default_symbol_map;
use cassandra::infrastructure::observability::{Metrics, MetricsReporter};
use cassandra::infrastructure::snapshot::apply_snapshot_file;
use cassandra::infrastructure::{YahooQuoteProvider, load_model};
use cassandra::interfaces::report::{render_assessment, render_fetch, render_groups};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless stock market crash risk assessment", long_about = None)]
struct Cli {
    /// Model artifact (defaults to MODEL_PATH)
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate crash risk for the current indicator values
    Assess {
        /// Manual value, repeatable
        #[arg(long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,

        /// CSV snapshot with `indicator,value` columns
        #[arg(long)]
        input: Option<PathBuf>,

        /// Fetch the latest closes before applying manual values
        #[arg(long)]
        fetch: bool,

        /// Print a JSON document instead of text
        #[arg(long)]
        json: bool,
    },
    /// Fetch the latest close for every mapped indicator
    Fetch {
        #[arg(long)]
        json: bool,
    },
    /// Show how the model's features are grouped
    Features,
}

fn init_logging(json: bool) {
    let filter = EnvFilter::from_default_env().add_directive(Level::INFO.into());
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn fetcher(config: &Config, metrics: &Metrics) -> MarketDataFetcher {
    let provider = YahooQuoteProvider::new(
        config.quote_base_url.clone(),
        config.fetch_timeout_secs,
        config.fetch_max_retries,
    );
    MarketDataFetcher::new(Arc::new(provider)).with_metrics(metrics.clone())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(path) = cli.model {
        config.model_path = path;
    }
    init_logging(config.log_json);

    let metrics = Metrics::new()?;
    let mut quiet_stdout = false;

    match cli.command {
        Command::Features => {
            let model = load_model(&config.model_path)?;
            let analyzer = MarketAnalyzer::new(model);
            println!(
                "Model {} ({}) expects {} features\n",
                analyzer.model_name(),
                analyzer.model_version(),
                analyzer.feature_names().len()
            );
            print!("{}", render_groups(&analyzer.groups()));
        }
        Command::Fetch { json } => {
            let report = fetcher(&config, &metrics)
                .fetch_latest(&default_symbol_map())
                .await;
            if json {
                quiet_stdout = true;
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render_fetch(&report));
            }
        }
        Command::Assess {
            set,
            input,
            fetch,
            json,
        } => {
            let model = load_model(&config.model_path)?;
            let analyzer = MarketAnalyzer::new(model).with_metrics(metrics.clone());
            let mut values = analyzer.default_values();

            // Later sources win: fetched, then snapshot, then --set
            if fetch {
                let report = fetcher(&config, &metrics)
                    .fetch_latest(&default_symbol_map())
                    .await;
                report.apply_to(&mut values);
            }
            if let Some(path) = input {
                apply_snapshot_file(&mut values, &path)?;
            }
            for raw in &set {
                values
                    .apply_assignment(raw)
                    .with_context(|| format!("Invalid --set {}", raw))?;
            }

            let assessment = analyzer.analyze(&values)?;
            let degraded = values.degraded();

            if json {
                quiet_stdout = true;
                let inputs: Vec<_> = values
                    .iter()
                    .map(|(name, v)| json!({ "name": name, "value": v.value, "source": v.source }))
                    .collect();
                let doc = json!({
                    "assessment": assessment,
                    "inputs": inputs,
                    "degraded": degraded,
                });
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                print!("{}", render_assessment(&assessment, &degraded));
            }
        }
    }

    if config.metrics_enabled && !quiet_stdout {
        MetricsReporter::new(metrics).report();
    }
    info!("Done");

    Ok(())
}
