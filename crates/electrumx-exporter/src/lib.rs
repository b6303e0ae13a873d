//! electrumx-exporter library entry.
//!
//! Wires config, the gauge registry, the daemon/explorer collectors and the
//! HTTP router. Consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod collector;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
