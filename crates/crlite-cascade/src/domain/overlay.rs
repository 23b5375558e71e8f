//! Session-local overlay filters
//!
//! Two add-only filters populated while the process runs. They hold
//! certificate serial numbers whose domain was, at observation time, either
//! listed by the revoked-domain feed (`revoked_recent`) or not
//! (`whitelisted_recent`). Nothing is persisted; a restart starts empty.

use serde::Serialize;

use super::bloom_filter::BloomFilter;
use super::config::EngineConfig;
use crate::error::ConstructionError;

/// Which overlay filter an observation was recorded in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayTarget {
    RevokedRecent,
    WhitelistedRecent,
}

/// Result of consulting both overlay filters for a serial.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OverlayHit {
    pub whitelisted: bool,
    pub revoked: bool,
}

/// The pair of overlay filters.
#[derive(Clone, Debug)]
pub struct DynamicOverlay {
    revoked_recent: BloomFilter,
    whitelisted_recent: BloomFilter,
}

impl DynamicOverlay {
    /// Create empty overlay filters sized by `config`.
    pub fn new(config: &EngineConfig) -> Result<Self, ConstructionError> {
        Ok(Self {
            revoked_recent: BloomFilter::new(config.overlay_size, config.overlay_hash_count)?,
            whitelisted_recent: BloomFilter::new(config.overlay_size, config.overlay_hash_count)?,
        })
    }

    /// Record `serial` according to whether its domain is currently listed.
    pub fn record(&mut self, serial: &str, domain_listed: bool) -> OverlayTarget {
        if domain_listed {
            self.revoked_recent.add(serial);
            OverlayTarget::RevokedRecent
        } else {
            self.whitelisted_recent.add(serial);
            OverlayTarget::WhitelistedRecent
        }
    }

    /// Consult both filters without mutating either.
    pub fn lookup(&self, serial: &str) -> OverlayHit {
        OverlayHit {
            whitelisted: self.whitelisted_recent.has(serial),
            revoked: self.revoked_recent.has(serial),
        }
    }

    pub fn revoked_recent(&self) -> &BloomFilter {
        &self.revoked_recent
    }

    pub fn whitelisted_recent(&self) -> &BloomFilter {
        &self.whitelisted_recent
    }
}
