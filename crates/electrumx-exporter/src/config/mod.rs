//! Exporter config loader.
//!
//! Sources, applied once at startup in this order:
//! 1. built-in defaults
//! 2. strict YAML file named by `EXPORTER_CONFIG`, if set
//! 3. environment overrides (`HOST`, `PORT`, `RPC_HOST`, `RPC_PORT`,
//!    `RPC_TIMEOUT_SECS`, `INSIGHT_URL`, `INSIGHT_TIMEOUT_SECS`)

pub mod schema;

use std::fs;

use electrumx_exporter_core::error::{ExporterError, Result};

pub use schema::{ExplorerSection, ExporterConfig, RpcSection, ServerSection};

/// Environment variable naming an optional YAML config file.
pub const CONFIG_PATH_ENV: &str = "EXPORTER_CONFIG";

/// Load config from the process environment.
pub fn load() -> Result<ExporterConfig> {
    let mut cfg = match env_var(CONFIG_PATH_ENV) {
        Some(path) => read_file(&path)?,
        None => ExporterConfig::default(),
    };
    apply_env(&mut cfg, env_var)?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_from_file(path: &str) -> Result<ExporterConfig> {
    let cfg = read_file(path)?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_from_str(s: &str) -> Result<ExporterConfig> {
    let cfg = parse_yaml(s)?;
    cfg.validate()?;
    Ok(cfg)
}

/// Overlay environment-style settings onto `cfg`. Empty values count as unset.
pub fn apply_env<F>(cfg: &mut ExporterConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("HOST") {
        cfg.server.host = Some(v);
    }
    if let Some(v) = get("PORT") {
        cfg.server.port = parse_num("PORT", &v)?;
    }
    if let Some(v) = get("RPC_HOST") {
        cfg.rpc.host = v;
    }
    if let Some(v) = get("RPC_PORT") {
        cfg.rpc.port = parse_num("RPC_PORT", &v)?;
    }
    if let Some(v) = get("RPC_TIMEOUT_SECS") {
        cfg.rpc.timeout_secs = parse_num("RPC_TIMEOUT_SECS", &v)?;
    }
    if let Some(v) = get("INSIGHT_URL") {
        cfg.explorer.url = Some(v);
    }
    if let Some(v) = get("INSIGHT_TIMEOUT_SECS") {
        cfg.explorer.timeout_secs = parse_num("INSIGHT_TIMEOUT_SECS", &v)?;
    }
    Ok(())
}

fn read_file(path: &str) -> Result<ExporterConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| ExporterError::Config(format!("read config {path} failed: {e}")))?;
    parse_yaml(&s)
}

fn parse_yaml(s: &str) -> Result<ExporterConfig> {
    serde_yaml::from_str(s).map_err(|e| ExporterError::Config(format!("invalid yaml: {e}")))
}

fn parse_num<T>(key: &str, v: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    v.trim()
        .parse()
        .map_err(|e| ExporterError::Config(format!("{key}={v:?}: {e}")))
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
