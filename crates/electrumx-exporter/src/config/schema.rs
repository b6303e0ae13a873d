use std::time::Duration;

use serde::Deserialize;
use electrumx_exporter_core::error::{ExporterError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub rpc: RpcSection,

    #[serde(default)]
    pub explorer: ExplorerSection,
}

impl ExporterConfig {
    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.rpc.validate()?;
        self.explorer.validate()?;
        Ok(())
    }

    /// Host and port for the exposition server. The host may be a name or
    /// an IP literal; an unset host binds all interfaces.
    pub fn listen_target(&self) -> (&str, u16) {
        let host = self.server.host.as_deref().unwrap_or(BIND_ALL);
        (host, self.server.port)
    }
}

const BIND_ALL: &str = "0.0.0.0";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default)]
    pub host: Option<String>,

    #[serde(default = "default_server_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: None,
            port: default_server_port(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(ExporterError::Config("server.port must not be 0".into()));
        }
        if self.host.as_deref().is_some_and(|h| h.trim().is_empty()) {
            return Err(ExporterError::Config("server.host must not be blank".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RpcSection {
    #[serde(default = "default_rpc_host")]
    pub host: String,

    #[serde(default = "default_rpc_port")]
    pub port: u16,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// 0 disables the response size cap.
    #[serde(default)]
    pub max_frame_bytes: usize,
}

impl Default for RpcSection {
    fn default() -> Self {
        Self {
            host: default_rpc_host(),
            port: default_rpc_port(),
            timeout_secs: default_timeout_secs(),
            max_frame_bytes: 0,
        }
    }
}

impl RpcSection {
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(ExporterError::Config("rpc.host must not be empty".into()));
        }
        if self.port == 0 {
            return Err(ExporterError::Config("rpc.port must not be 0".into()));
        }
        if !(1..=300).contains(&self.timeout_secs) {
            return Err(ExporterError::Config(
                "rpc.timeout_secs must be between 1 and 300".into(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExplorerSection {
    /// Insight-style status endpoint; enables the external height gauge.
    #[serde(default)]
    pub url: Option<String>,

    /// Upper bound the explorer may add to a successful scrape.
    #[serde(default = "default_explorer_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ExplorerSection {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: default_explorer_timeout_secs(),
        }
    }
}

impl ExplorerSection {
    pub fn validate(&self) -> Result<()> {
        if let Some(url) = &self.url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ExporterError::Config(format!(
                    "explorer.url must be an http(s) URL, got {url:?}"
                )));
            }
        }
        if !(1..=60).contains(&self.timeout_secs) {
            return Err(ExporterError::Config(
                "explorer.timeout_secs must be between 1 and 60".into(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_server_port() -> u16 {
    8003
}
fn default_rpc_host() -> String {
    "127.0.0.1".into()
}
fn default_rpc_port() -> u16 {
    8000
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_explorer_timeout_secs() -> u64 {
    5
}
