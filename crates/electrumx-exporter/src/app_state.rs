//! Shared application state for the exporter.
//!
//! Built once at startup from `ExporterConfig` and handed to the router.
//! The gauge registry lives here rather than in a process-wide static.

use std::sync::Arc;

use electrumx_exporter_core::error::Result;

use crate::collector::{Collector, ExplorerClient, HeightSource, RpcClient};
use crate::config::ExporterConfig;
use crate::obs::metrics::ExporterMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    collector: Collector,
}

impl AppState {
    /// Build state with production RPC and explorer clients.
    pub fn new(cfg: ExporterConfig) -> Result<Self> {
        let rpc = RpcClient::from_config(&cfg.rpc);

        let explorer = match cfg.explorer.url.as_deref() {
            Some(url) => {
                let client = ExplorerClient::new(url, cfg.explorer.timeout())?;
                Some(Arc::new(client) as Arc<dyn HeightSource>)
            }
            None => None,
        };

        let collector = Collector::new(
            Arc::new(rpc),
            explorer,
            Arc::new(ExporterMetrics::new()),
            cfg.rpc.port,
        );
        Ok(Self::from_collector(collector))
    }

    /// Build state around an already wired collector.
    pub fn from_collector(collector: Collector) -> Self {
        Self {
            inner: Arc::new(AppStateInner { collector }),
        }
    }

    pub fn collector(&self) -> &Collector {
        &self.inner.collector
    }

    pub fn metrics(&self) -> &Arc<ExporterMetrics> {
        self.inner.collector.metrics()
    }
}
