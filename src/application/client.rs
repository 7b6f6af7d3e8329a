use crate::application::fetcher::{FetchReport, MarketDataFetcher};
use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, Sender, unbounded};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Requests from the UI to the background runtime
#[derive(Clone, Debug)]
pub enum DashboardCommand {
    FetchMarketData(Vec<(String, String)>),
}

/// Unified event type for the User Interface
#[derive(Clone, Debug)]
pub enum DashboardEvent {
    FetchCompleted(FetchReport),
    Log(String),
}

/// A client interface for the background fetch worker.
/// The UI thread only ever calls non-blocking methods on it.
pub struct DashboardClient {
    cmd_tx: Sender<DashboardCommand>,
    event_rx: Receiver<DashboardEvent>,
    log_rx: Receiver<String>,
}

impl DashboardClient {
    /// Start the worker thread with its own tokio runtime.
    ///
    /// The thread exits once the client is dropped.
    pub fn spawn(fetcher: Arc<MarketDataFetcher>, log_rx: Receiver<String>) -> Result<Self> {
        let (cmd_tx, cmd_rx) = unbounded::<DashboardCommand>();
        let (event_tx, event_rx) = unbounded::<DashboardEvent>();

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .context("Failed to create tokio runtime")?;

        std::thread::Builder::new()
            .name("cassandra-fetch".to_string())
            .spawn(move || {
                info!("Fetch worker started");
                while let Ok(cmd) = cmd_rx.recv() {
                    match cmd {
                        DashboardCommand::FetchMarketData(symbol_map) => {
                            let report = runtime.block_on(fetcher.fetch_latest(&symbol_map));
                            if event_tx.send(DashboardEvent::FetchCompleted(report)).is_err() {
                                break;
                            }
                        }
                    }
                }
                info!("Fetch worker stopped");
            })
            .context("Failed to spawn fetch worker thread")?;

        Ok(Self {
            cmd_tx,
            event_rx,
            log_rx,
        })
    }

    /// Poll for the next available event from any channel.
    /// Fetch results come before logs.
    pub fn poll_next(&mut self) -> Option<DashboardEvent> {
        if let Ok(event) = self.event_rx.try_recv() {
            return Some(event);
        }

        if let Ok(msg) = self.log_rx.try_recv() {
            return Some(DashboardEvent::Log(msg));
        }

        None
    }

    /// Block up to `timeout` for a worker event. Logs are not included.
    pub fn wait_event(&self, timeout: Duration) -> Option<DashboardEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    pub fn request_fetch(&self, symbol_map: Vec<(String, String)>) -> Result<()> {
        self.cmd_tx
            .send(DashboardCommand::FetchMarketData(symbol_map))
            .map_err(|e| {
                error!("Fetch worker is gone: {}", e);
                anyhow::anyhow!("Failed to send fetch command: {}", e)
            })
    }
}
