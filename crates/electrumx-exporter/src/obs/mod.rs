//! In-process gauge registry rendered in Prometheus text format.
//!
//! Gauges are plain atomics owned by a single `ExporterMetrics` value created
//! at startup; the `/metrics` handler renders them after each scrape.

pub mod metrics;
