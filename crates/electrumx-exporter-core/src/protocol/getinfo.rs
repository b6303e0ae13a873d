//! Typed `getinfo` reply.
//!
//! Field names mirror the daemon's keys verbatim, spaces included. The
//! daemon reports more keys than listed here (pid, uptime, version, ...);
//! those are ignored. Every listed key is required: a reply missing any of
//! them is rejected whole so a scrape never publishes a half-updated view.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ExporterError, Result};

/// Name of the daemon RPC method returning the status snapshot.
pub const GETINFO_METHOD: &str = "getinfo";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GetInfo {
    #[serde(rename = "daemon height")]
    pub daemon_height: i64,
    #[serde(rename = "db height")]
    pub db_height: i64,
    pub db_flush_count: i64,
    pub peers: PeerCounts,
    #[serde(rename = "request total")]
    pub request_total: i64,
    pub sessions: SessionCounts,
    #[serde(rename = "txs sent")]
    pub txs_sent: i64,
}

/// Peer counts grouped by connection state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PeerCounts {
    pub bad: i64,
    pub good: i64,
    pub never: i64,
    pub stale: i64,
    pub total: i64,
}

/// Client session counts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionCounts {
    pub count: i64,
    #[serde(rename = "count with subs")]
    pub count_with_subs: i64,
    pub errors: i64,
    pub logged: i64,
    #[serde(rename = "pending requests")]
    pub pending_requests: i64,
    pub subs: i64,
}

impl GetInfo {
    /// Convert the `result` member of a `getinfo` response.
    pub fn from_value(v: Value) -> Result<Self> {
        serde_json::from_value(v)
            .map_err(|e| ExporterError::Protocol(format!("unexpected getinfo reply: {e}")))
    }
}
