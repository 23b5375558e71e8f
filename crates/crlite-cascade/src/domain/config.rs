//! Engine configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use crlite_cascade::domain::EngineConfigBuilder;
//!
//! let config = EngineConfigBuilder::new()
//!     .overlay_size(2048)
//!     .overlay_hash_count(5)
//!     .build()
//!     .expect("Valid config");
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConstructionError;

/// Default overlay filter size in bits
pub const DEFAULT_OVERLAY_SIZE: usize = 1000;

/// Default number of seeds per overlay key
pub const DEFAULT_OVERLAY_HASH_COUNT: usize = 4;

/// Revocation engine configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Size of each overlay filter in bits
    pub overlay_size: usize,
    /// Seeds per key for each overlay filter
    pub overlay_hash_count: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            overlay_size: DEFAULT_OVERLAY_SIZE,
            overlay_hash_count: DEFAULT_OVERLAY_HASH_COUNT,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration with validation
    pub fn new(overlay_size: usize, overlay_hash_count: usize) -> Result<Self, ConstructionError> {
        let config = Self {
            overlay_size,
            overlay_hash_count,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConstructionError> {
        if self.overlay_size == 0 {
            return Err(ConstructionError::ZeroSize);
        }
        if self.overlay_hash_count == 0 {
            return Err(ConstructionError::ZeroHashCount);
        }
        Ok(())
    }
}

/// Builder for EngineConfig with validation
#[derive(Default)]
pub struct EngineConfigBuilder {
    overlay_size: Option<usize>,
    overlay_hash_count: Option<usize>,
}

impl EngineConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set overlay filter size in bits
    pub fn overlay_size(mut self, bits: usize) -> Self {
        self.overlay_size = Some(bits);
        self
    }

    /// Set overlay seeds per key
    pub fn overlay_hash_count(mut self, count: usize) -> Self {
        self.overlay_hash_count = Some(count);
        self
    }

    /// Build the EngineConfig, validating all parameters
    pub fn build(self) -> Result<EngineConfig, ConstructionError> {
        let defaults = EngineConfig::default();

        EngineConfig::new(
            self.overlay_size.unwrap_or(defaults.overlay_size),
            self.overlay_hash_count.unwrap_or(defaults.overlay_hash_count),
        )
    }
}
