//! Shared error type across electrumx-exporter crates.

use std::time::Duration;

use thiserror::Error;

/// Stable error classification used in logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Daemon could not be reached.
    Unreachable,
    /// Daemon did not answer in time.
    Timeout,
    /// Reply was malformed or missing expected fields.
    Protocol,
    /// Daemon answered with a JSON-RPC error object.
    Rpc,
    /// Invalid configuration.
    Config,
    /// Block explorer fetch failed.
    Explorer,
    /// Anything else.
    Internal,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Unreachable => "UNREACHABLE",
            ErrorKind::Timeout => "TIMEOUT",
            ErrorKind::Protocol => "PROTOCOL",
            ErrorKind::Rpc => "RPC",
            ErrorKind::Config => "CONFIG",
            ErrorKind::Explorer => "EXPLORER",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ExporterError>;

/// Unified error type used by core and the exporter service.
#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("daemon unreachable: {0}")]
    Unreachable(String),
    #[error("daemon did not answer within {0:?}")]
    Timeout(Duration),
    #[error("protocol error: {0}")]
    Protocol(String),
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("frame exceeds {0} bytes")]
    FrameTooLarge(usize),
    #[error("config: {0}")]
    Config(String),
    #[error("explorer: {0}")]
    Explorer(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl ExporterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExporterError::Unreachable(_) => ErrorKind::Unreachable,
            ExporterError::Timeout(_) => ErrorKind::Timeout,
            ExporterError::Protocol(_) | ExporterError::FrameTooLarge(_) => ErrorKind::Protocol,
            ExporterError::Rpc { .. } => ErrorKind::Rpc,
            ExporterError::Config(_) => ErrorKind::Config,
            ExporterError::Explorer(_) => ErrorKind::Explorer,
            ExporterError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// True for connection-level failures (refused, reset, timed out).
    pub fn is_unreachable(&self) -> bool {
        matches!(self, ExporterError::Unreachable(_) | ExporterError::Timeout(_))
    }
}
