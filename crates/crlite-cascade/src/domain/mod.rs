//! Domain Layer - Pure revocation logic
//!
//! This layer contains:
//! - Keyed SHA-256 index derivation
//! - Add-only Bloom filter with its JSON wire form
//! - Filter cascade and its classification walk
//! - Session overlay filters
//! - Revoked-domain snapshot
//! - Certificate signals and blocking policy
//! - Configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - Pure functions where possible

pub mod bloom_filter;
pub mod cascade;
pub mod certificate;
pub mod config;
pub mod hash_functions;
pub mod overlay;
pub mod snapshot;
pub mod verdict;

pub use bloom_filter::{BitValue, BloomFilter, BloomFilterData};
pub use cascade::{CascadeLevel, CascadeMatch, FilterCascade, LevelType};
pub use certificate::{
    parse_certificate_time, BlockDecision, BlockPolicy, BlockReason, CertificateInfo,
    CertificateSignals,
};
pub use config::{EngineConfig, EngineConfigBuilder};
pub use hash_functions::{hash_positions, index, keyed_hash};
pub use overlay::{DynamicOverlay, OverlayHit, OverlayTarget};
pub use snapshot::{normalize_domain, RevokedDomainSet};
pub use verdict::Verdict;
