//! Outbound Ports (Driven Ports)
//!
//! Collaborators the engine depends on but never implements itself.

use async_trait::async_trait;

use crate::domain::{CertificateInfo, FilterCascade};
use crate::error::{FeedError, LoadError, LookupError};

/// Source of the revoked-domain list (Driven Port)
///
/// Retry policy, if any, belongs to the implementation.
#[async_trait]
pub trait RevokedDomainFeed: Send + Sync {
    /// Fetch the current list of revoked domains.
    async fn fetch_revoked_domains(&self) -> Result<Vec<String>, FeedError>;
}

/// Certificate lookup by domain (Driven Port)
#[async_trait]
pub trait CertificateIntelligence: Send + Sync {
    /// Fetch the certificate currently served for `domain`.
    async fn lookup(&self, domain: &str) -> Result<CertificateInfo, LookupError>;
}

/// Load-once static cascade (Driven Port)
#[async_trait]
pub trait CascadeSource: Send + Sync {
    /// Load and validate the cascade.
    async fn load_cascade(&self) -> Result<FilterCascade, LoadError>;

    /// Human-readable origin for logs
    fn describe(&self) -> String;
}
