//! Revocation Decision Engine
//!
//! Owns the static cascade, the overlay filters and the current
//! revoked-domain snapshot, and answers `decide` in a fixed priority order:
//!
//! 1. empty serial ⇒ `Unknown`
//! 2. overlay whitelist hit ⇒ `NotRevoked`
//! 3. overlay revoked hit ⇒ `Revoked`
//! 4. cascade loaded ⇒ cascade classification
//! 5. otherwise ⇒ `Unknown`
//!
//! Locking: the cascade is immutable and shared through an `Arc`; the
//! overlay has a single writer (`observe`) and many readers (`decide`);
//! snapshot replacement swaps an `Arc` under a write lock, so readers keep
//! the previous snapshot until the swap completes.
//!
//! Observations are dropped until the first feed fetch succeeds: an
//! unfetched feed lists nothing, which is not the same as not listing a
//! domain.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::domain::{
    DynamicOverlay, EngineConfig, FilterCascade, OverlayTarget, RevokedDomainSet, Verdict,
};
use crate::error::ConstructionError;
use crate::metrics::{DecisionSource, Metrics};
use crate::ports::RevocationApi;

/// Revocation engine implementation
///
/// Created once at startup and shared behind an `Arc`.
pub struct RevocationEngine {
    cascade: RwLock<Option<Arc<FilterCascade>>>,
    overlay: RwLock<DynamicOverlay>,
    snapshot: RwLock<Arc<RevokedDomainSet>>,
    metrics: Arc<Metrics>,
}

impl RevocationEngine {
    /// Create an engine with empty overlays and no cascade.
    pub fn new(config: EngineConfig) -> Result<Self, ConstructionError> {
        config.validate()?;
        Ok(Self {
            cascade: RwLock::new(None),
            overlay: RwLock::new(DynamicOverlay::new(&config)?),
            snapshot: RwLock::new(Arc::new(RevokedDomainSet::empty())),
            metrics: Arc::new(Metrics::new()),
        })
    }

    /// Create an engine with a cascade already in place.
    pub fn with_cascade(
        config: EngineConfig,
        cascade: FilterCascade,
    ) -> Result<Self, ConstructionError> {
        let engine = Self::new(config)?;
        engine.install_cascade(cascade);
        Ok(engine)
    }

    /// Install the static cascade. Called once at startup.
    pub fn install_cascade(&self, cascade: FilterCascade) {
        info!(
            depth = cascade.depth(),
            total_bits = cascade.total_bits(),
            "Static cascade installed"
        );
        *self.cascade.write() = Some(Arc::new(cascade));
    }

    pub fn has_cascade(&self) -> bool {
        self.cascade.read().is_some()
    }

    pub fn cascade(&self) -> Option<Arc<FilterCascade>> {
        self.cascade.read().clone()
    }

    /// Swap in a new revoked-domain snapshot, returning the previous one.
    pub fn replace_snapshot(&self, snapshot: RevokedDomainSet) -> Arc<RevokedDomainSet> {
        let next = Arc::new(snapshot);
        std::mem::replace(&mut *self.snapshot.write(), next)
    }

    /// Current revoked-domain snapshot
    pub fn snapshot(&self) -> Arc<RevokedDomainSet> {
        self.snapshot.read().clone()
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// Decide and report which stage produced the verdict.
    pub fn decide_with_source(&self, serial: &str) -> (Verdict, DecisionSource) {
        if serial.trim().is_empty() {
            return (Verdict::Unknown, DecisionSource::MissingSerial);
        }

        let hit = self.overlay.read().lookup(serial);
        if hit.whitelisted {
            return (Verdict::NotRevoked, DecisionSource::OverlayWhitelist);
        }
        if hit.revoked {
            return (Verdict::Revoked, DecisionSource::OverlayRevoked);
        }

        match self.cascade() {
            Some(cascade) => {
                let result = cascade.classify(serial);
                debug!(
                    serial = serial,
                    level = result.level,
                    survived_all = result.survived_all,
                    revoked = result.revoked,
                    "Cascade classification"
                );
                (Verdict::from_revoked(result.revoked), DecisionSource::Cascade)
            }
            None => (Verdict::Unknown, DecisionSource::NoCascade),
        }
    }
}

impl RevocationApi for RevocationEngine {
    fn decide(&self, serial: &str) -> Verdict {
        let (verdict, source) = self.decide_with_source(serial);
        self.metrics.record_decision(verdict, source);
        debug!(serial = serial, verdict = %verdict, source = ?source, "Decision");
        verdict
    }

    fn observe(&self, domain: &str, serial: &str) -> Option<OverlayTarget> {
        if serial.trim().is_empty() {
            debug!(domain = domain, "Observation without serial ignored");
            return None;
        }

        let snapshot = self.snapshot();
        if snapshot.fetched_at().is_none() {
            debug!(
                domain = domain,
                "No revoked-domain feed fetched yet, observation ignored"
            );
            return None;
        }

        let listed = snapshot.contains(domain);
        let target = self.overlay.write().record(serial, listed);
        self.metrics.record_observation(target);
        debug!(domain = domain, serial = serial, target = ?target, "Observation recorded");
        Some(target)
    }
}
