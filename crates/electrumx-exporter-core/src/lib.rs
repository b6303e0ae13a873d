//! electrumx-exporter core: error types and the daemon wire protocol.
//!
//! This crate defines the JSON-RPC framing used to talk to an ElectrumX
//! daemon and the typed `getinfo` status snapshot. It carries no runtime or
//! HTTP dependencies so the protocol can be tested in isolation from sockets.
//!
//! Panics, `unwrap`, and `expect` are compile-denied here. Every fallible
//! path surfaces as `ExporterError` so a malformed reply can never take the
//! exporter process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Error type, its stable classification and the shared result alias.
pub use error::{ErrorKind, ExporterError, Result};
