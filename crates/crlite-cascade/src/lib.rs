//! # CRLite Cascade
//!
//! Certificate revocation decisions from a multi-level Bloom filter cascade,
//! refined at runtime by per-session overlay filters.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `BloomFilter`: Add-only filter with SHA-256 keyed indexes
//!   - `FilterCascade`: Alternating blacklist/whitelist levels
//!   - `DynamicOverlay`: Session-learned revoked/whitelisted serials
//!   - `RevokedDomainSet`: Snapshot of the revoked-domain feed
//!   - `BlockPolicy`: Combines certificate signals with the verdict
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `RevocationApi`: Driving port (`decide`, `observe`)
//!   - `RevokedDomainFeed`, `CertificateIntelligence`, `CascadeSource`:
//!     Driven ports
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `RevocationEngine`: Implements `RevocationApi`
//!   - `FeedRefresher`: Periodic snapshot replacement
//!
//! - **Adapters Layer** (`adapters/`): External connections
//!   - `CrliteApiClient`: `/revokedList` and `/cert` over HTTP
//!   - `FileCascadeSource`, `BundledCascadeSource`: Static cascade loading
//!
//! ## Invariants
//!
//! - No false negatives: a key added to a filter is always reported present.
//! - Every filter in the cascade and overlay uses the same index derivation,
//!   `SHA-256("<key>-<seed>")[0..4]` as big-endian `u32`, modulo size.
//! - A decision never fails: missing inputs answer `Unknown`.
//!
//! ## Usage Example
//!
//! ```ignore
//! use chrono::Utc;
//! use crlite_cascade::{
//!     EngineConfig, FilterCascade, RevocationApi, RevocationEngine, RevokedDomainSet,
//! };
//!
//! let cascade = FilterCascade::from_json_slice(&std::fs::read("cascade_filters.json")?)?;
//! let engine = RevocationEngine::with_cascade(EngineConfig::default(), cascade)?;
//!
//! engine.replace_snapshot(RevokedDomainSet::from_domains(feed_domains, Utc::now()));
//! engine.observe("example.com", "04E1A73C");
//! let verdict = engine.decide("04E1A73C");
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use domain::{
    normalize_domain, BlockDecision, BlockPolicy, BlockReason, BloomFilter, CascadeLevel,
    CertificateInfo, CertificateSignals, DynamicOverlay, EngineConfig, EngineConfigBuilder,
    FilterCascade, LevelType, OverlayTarget, RevokedDomainSet, Verdict,
};
pub use error::{ConstructionError, FeedError, LoadError, LookupError};
pub use metrics::{DecisionSource, Metrics, MetricsSnapshot};
pub use ports::{CascadeSource, CertificateIntelligence, RevocationApi, RevokedDomainFeed};
pub use service::{FeedRefresher, RevocationEngine};

pub use adapters::{BundledCascadeSource, CrliteApiClient, FileCascadeSource};
