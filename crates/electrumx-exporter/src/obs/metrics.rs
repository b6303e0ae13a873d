//! Fixed gauge set mirrored from the daemon's `getinfo` reply.
//!
//! Every gauge is last-write-wins. A failed scrape leaves the previous values
//! in place; a gauge that has never been written renders no sample line.

use std::fmt::Write;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use electrumx_exporter_core::protocol::GetInfo;

/// Content type of the text exposition format.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// A single unlabeled gauge.
pub struct Gauge {
    name: &'static str,
    help: &'static str,
    value: AtomicI64,
    set: AtomicBool,
}

impl Gauge {
    const fn new(name: &'static str, help: &'static str) -> Self {
        Self {
            name,
            help,
            value: AtomicI64::new(0),
            set: AtomicBool::new(false),
        }
    }

    pub fn set(&self, v: i64) {
        self.value.store(v, Ordering::Relaxed);
        self.set.store(true, Ordering::Release);
    }

    /// Current value, or `None` if never set.
    pub fn get(&self) -> Option<i64> {
        if self.set.load(Ordering::Acquire) {
            Some(self.value.load(Ordering::Relaxed))
        } else {
            None
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn render(&self, out: &mut String) {
        let _ = writeln!(out, "# HELP {} {}", self.name, self.help);
        let _ = writeln!(out, "# TYPE {} gauge", self.name);
        if let Some(v) = self.get() {
            let _ = writeln!(out, "{} {}", self.name, v);
        }
    }
}

pub struct ExporterMetrics {
    pub daemon_height: Gauge,
    pub external_height: Gauge,
    pub db_height: Gauge,
    pub db_flush_count: Gauge,

    pub peers_bad: Gauge,
    pub peers_good: Gauge,
    pub peers_never: Gauge,
    pub peers_stale: Gauge,
    pub peers_total: Gauge,

    pub requests_total: Gauge,

    pub sessions_count: Gauge,
    pub sessions_count_with_subs: Gauge,
    pub sessions_errors: Gauge,
    pub sessions_logged: Gauge,
    pub sessions_pending: Gauge,
    pub sessions_subs: Gauge,

    pub txs_sent: Gauge,
}

impl Default for ExporterMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ExporterMetrics {
    pub fn new() -> Self {
        Self {
            daemon_height: Gauge::new("electrumx_daemon_height", "Daemon height"),
            external_height: Gauge::new("electrumx_external_height", "External height"),
            db_height: Gauge::new("electrumx_db_height", "DB height"),
            db_flush_count: Gauge::new("electrumx_db_flush_count", "DB flush count"),

            peers_bad: Gauge::new("electrumx_peers_bad", "Bad peers"),
            peers_good: Gauge::new("electrumx_peers_good", "Good peers"),
            peers_never: Gauge::new("electrumx_peers_never", "Never peers"),
            peers_stale: Gauge::new("electrumx_peers_stale", "Stale peers"),
            peers_total: Gauge::new("electrumx_peers_total", "Total peers"),

            requests_total: Gauge::new("electrumx_requests_total", "Total requests"),

            sessions_count: Gauge::new("electrumx_sessions_count", "Sessions count"),
            sessions_count_with_subs: Gauge::new(
                "electrumx_sessions_count_with_subs",
                "Sessions counts with subs",
            ),
            sessions_errors: Gauge::new("electrumx_sessions_error", "Sessions with errors"),
            sessions_logged: Gauge::new("electrumx_sessions_logged", "Sessions logged"),
            sessions_pending: Gauge::new("electrumx_sessions_pending", "Sessions pending"),
            sessions_subs: Gauge::new("electrumx_sessions_subs", "Sessions subs"),

            txs_sent: Gauge::new("electrumx_txs_sent", "Number of TXs sent"),
        }
    }

    /// Copy one status snapshot into the gauges. No conversion is applied.
    pub fn record(&self, info: &GetInfo) {
        self.daemon_height.set(info.daemon_height);
        self.db_height.set(info.db_height);
        self.db_flush_count.set(info.db_flush_count);

        self.peers_bad.set(info.peers.bad);
        self.peers_good.set(info.peers.good);
        self.peers_never.set(info.peers.never);
        self.peers_stale.set(info.peers.stale);
        self.peers_total.set(info.peers.total);

        self.requests_total.set(info.request_total);

        self.sessions_count.set(info.sessions.count);
        self.sessions_count_with_subs.set(info.sessions.count_with_subs);
        self.sessions_errors.set(info.sessions.errors);
        self.sessions_logged.set(info.sessions.logged);
        self.sessions_pending.set(info.sessions.pending_requests);
        self.sessions_subs.set(info.sessions.subs);

        self.txs_sent.set(info.txs_sent);
    }

    pub fn set_external_height(&self, height: i64) {
        self.external_height.set(height);
    }

    fn gauges(&self) -> [&Gauge; 17] {
        [
            &self.daemon_height,
            &self.external_height,
            &self.db_height,
            &self.db_flush_count,
            &self.peers_bad,
            &self.peers_good,
            &self.peers_never,
            &self.peers_stale,
            &self.peers_total,
            &self.requests_total,
            &self.sessions_count,
            &self.sessions_count_with_subs,
            &self.sessions_errors,
            &self.sessions_logged,
            &self.sessions_pending,
            &self.sessions_subs,
            &self.txs_sent,
        ]
    }

    /// Render all gauges in registration order.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for g in self.gauges() {
            g.render(&mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use electrumx_exporter_core::protocol::{PeerCounts, SessionCounts};

    fn sample() -> GetInfo {
        GetInfo {
            daemon_height: 800000,
            db_height: 799999,
            db_flush_count: 12,
            peers: PeerCounts { bad: 1, good: 10, never: 2, stale: 0, total: 13 },
            request_total: 500,
            sessions: SessionCounts {
                count: 5,
                count_with_subs: 3,
                errors: 0,
                logged: 5,
                pending_requests: 0,
                subs: 3,
            },
            txs_sent: 42,
        }
    }

    #[test]
    fn fresh_registry_has_no_samples() {
        let m = ExporterMetrics::new();
        let text = m.render();
        assert!(text.contains("# TYPE electrumx_daemon_height gauge"));
        assert!(!text.lines().any(|l| l.starts_with("electrumx_")));
    }

    #[test]
    fn record_copies_every_field() {
        let m = ExporterMetrics::new();
        m.record(&sample());
        let text = m.render();
        for line in [
            "electrumx_daemon_height 800000",
            "electrumx_db_height 799999",
            "electrumx_db_flush_count 12",
            "electrumx_peers_bad 1",
            "electrumx_peers_good 10",
            "electrumx_peers_never 2",
            "electrumx_peers_stale 0",
            "electrumx_peers_total 13",
            "electrumx_requests_total 500",
            "electrumx_sessions_count 5",
            "electrumx_sessions_count_with_subs 3",
            "electrumx_sessions_error 0",
            "electrumx_sessions_logged 5",
            "electrumx_sessions_pending 0",
            "electrumx_sessions_subs 3",
            "electrumx_txs_sent 42",
        ] {
            assert!(text.lines().any(|l| l == line), "missing {line}");
        }
        assert_eq!(m.external_height.get(), None);
        assert!(!text.lines().any(|l| l.starts_with("electrumx_external_height ")));
    }

    #[test]
    fn names_are_unique() {
        let m = ExporterMetrics::new();
        let mut names: Vec<_> = m.gauges().iter().map(|g| g.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 17);
    }
}
