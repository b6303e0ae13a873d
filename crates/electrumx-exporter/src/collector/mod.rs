//! Scrape orchestration.
//!
//! One scrape = one `getinfo` call, then (only on success, only when
//! configured) one best-effort explorer fetch. Nothing is cached between
//! scrapes and failures never escape as panics.

pub mod explorer;
pub mod rpc;

use std::sync::Arc;

use async_trait::async_trait;

use electrumx_exporter_core::error::{ExporterError, Result};
use electrumx_exporter_core::protocol::GetInfo;

use crate::obs::metrics::ExporterMetrics;

pub use explorer::ExplorerClient;
pub use rpc::RpcClient;

/// Primary status source (the daemon's RPC port in production).
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch_status(&self) -> Result<GetInfo>;
}

/// Secondary chain height source (a block explorer in production).
#[async_trait]
pub trait HeightSource: Send + Sync {
    async fn fetch_height(&self) -> Result<i64>;
}

/// Result of one scrape cycle.
#[derive(Debug)]
pub enum ScrapeOutcome {
    /// Primary gauges were updated. `explorer` is `None` when no explorer is
    /// configured, otherwise the result of the best-effort fetch.
    Ok { explorer: Option<Result<i64>> },
    /// The daemon call failed; gauges keep their previous values.
    Failed(ExporterError),
}

impl ScrapeOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, ScrapeOutcome::Ok { .. })
    }
}

pub struct Collector {
    status: Arc<dyn StatusSource>,
    explorer: Option<Arc<dyn HeightSource>>,
    metrics: Arc<ExporterMetrics>,
    rpc_port: u16,
}

impl Collector {
    pub fn new(
        status: Arc<dyn StatusSource>,
        explorer: Option<Arc<dyn HeightSource>>,
        metrics: Arc<ExporterMetrics>,
        rpc_port: u16,
    ) -> Self {
        Self {
            status,
            explorer,
            metrics,
            rpc_port,
        }
    }

    pub fn metrics(&self) -> &Arc<ExporterMetrics> {
        &self.metrics
    }

    pub async fn scrape(&self) -> ScrapeOutcome {
        let info = match self.status.fetch_status().await {
            Ok(info) => info,
            Err(e) => {
                if e.is_unreachable() {
                    tracing::warn!(
                        error = %e,
                        "cannot connect - is ElectrumX catching up, not running, or is {} the wrong RPC port?",
                        self.rpc_port
                    );
                } else {
                    tracing::warn!(error = %e, kind = e.kind().as_str(), "error making request");
                }
                return ScrapeOutcome::Failed(e);
            }
        };

        self.metrics.record(&info);

        let explorer = match &self.explorer {
            Some(src) => {
                let res = src.fetch_height().await;
                match &res {
                    Ok(h) => self.metrics.set_external_height(*h),
                    Err(e) => tracing::debug!(error = %e, "explorer height unavailable"),
                }
                Some(res)
            }
            None => None,
        };

        tracing::debug!(daemon_height = info.daemon_height, db_height = info.db_height, "scrape ok");
        ScrapeOutcome::Ok { explorer }
    }
}
