//! Counters for revocation decisions and feed activity
//!
//! ## Usage
//!
//! ```ignore
//! use crlite_cascade::metrics::Metrics;
//!
//! let metrics = Metrics::new();
//! metrics.record_decision(Verdict::Revoked, DecisionSource::Cascade);
//! let snapshot = metrics.snapshot();
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::{OverlayTarget, Verdict};

/// Which stage of the decision order produced a verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecisionSource {
    /// Empty serial
    MissingSerial,
    OverlayWhitelist,
    OverlayRevoked,
    Cascade,
    /// No cascade loaded
    NoCascade,
}

/// Thread-safe counters for the engine and feed refresher.
#[derive(Debug, Default)]
pub struct Metrics {
    pub decisions_revoked: AtomicU64,
    pub decisions_not_revoked: AtomicU64,
    pub decisions_unknown: AtomicU64,
    pub overlay_whitelist_hits: AtomicU64,
    pub overlay_revoked_hits: AtomicU64,
    pub cascade_lookups: AtomicU64,
    pub observations_revoked: AtomicU64,
    pub observations_whitelisted: AtomicU64,
    pub feed_refreshes: AtomicU64,
    pub feed_failures: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one `decide` call.
    pub fn record_decision(&self, verdict: Verdict, source: DecisionSource) {
        let counter = match verdict {
            Verdict::Revoked => &self.decisions_revoked,
            Verdict::NotRevoked => &self.decisions_not_revoked,
            Verdict::Unknown => &self.decisions_unknown,
        };
        counter.fetch_add(1, Ordering::Relaxed);

        match source {
            DecisionSource::OverlayWhitelist => {
                self.overlay_whitelist_hits.fetch_add(1, Ordering::Relaxed);
            }
            DecisionSource::OverlayRevoked => {
                self.overlay_revoked_hits.fetch_add(1, Ordering::Relaxed);
            }
            DecisionSource::Cascade => {
                self.cascade_lookups.fetch_add(1, Ordering::Relaxed);
            }
            DecisionSource::MissingSerial | DecisionSource::NoCascade => {}
        }
    }

    /// Record one overlay insertion.
    pub fn record_observation(&self, target: OverlayTarget) {
        let counter = match target {
            OverlayTarget::RevokedRecent => &self.observations_revoked,
            OverlayTarget::WhitelistedRecent => &self.observations_whitelisted,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_feed_refresh(&self) {
        self.feed_refreshes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_feed_failure(&self) {
        self.feed_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            decisions_revoked: self.decisions_revoked.load(Ordering::Relaxed),
            decisions_not_revoked: self.decisions_not_revoked.load(Ordering::Relaxed),
            decisions_unknown: self.decisions_unknown.load(Ordering::Relaxed),
            overlay_whitelist_hits: self.overlay_whitelist_hits.load(Ordering::Relaxed),
            overlay_revoked_hits: self.overlay_revoked_hits.load(Ordering::Relaxed),
            cascade_lookups: self.cascade_lookups.load(Ordering::Relaxed),
            observations_revoked: self.observations_revoked.load(Ordering::Relaxed),
            observations_whitelisted: self.observations_whitelisted.load(Ordering::Relaxed),
            feed_refreshes: self.feed_refreshes.load(Ordering::Relaxed),
            feed_failures: self.feed_failures.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub decisions_revoked: u64,
    pub decisions_not_revoked: u64,
    pub decisions_unknown: u64,
    pub overlay_whitelist_hits: u64,
    pub overlay_revoked_hits: u64,
    pub cascade_lookups: u64,
    pub observations_revoked: u64,
    pub observations_whitelisted: u64,
    pub feed_refreshes: u64,
    pub feed_failures: u64,
}

impl MetricsSnapshot {
    pub fn total_decisions(&self) -> u64 {
        self.decisions_revoked + self.decisions_not_revoked + self.decisions_unknown
    }
}
