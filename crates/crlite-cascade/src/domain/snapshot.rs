//! Revoked-domain feed snapshot
//!
//! An immutable set of domains taken from one successful feed fetch. It is
//! only consulted when a certificate is observed, to pick the overlay filter
//! the serial goes into; decisions never read it.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

/// Canonical form used for both feed entries and observed domains.
///
/// Trims whitespace, lowercases, drops a trailing root dot and one leading
/// `www.` label.
pub fn normalize_domain(domain: &str) -> String {
    let lowered = domain.trim().to_ascii_lowercase();
    let without_root = lowered.strip_suffix('.').unwrap_or(&lowered);
    without_root
        .strip_prefix("www.")
        .unwrap_or(without_root)
        .to_string()
}

/// Domains listed by the feed at `fetched_at`.
#[derive(Clone, Debug, Default)]
pub struct RevokedDomainSet {
    domains: HashSet<String>,
    fetched_at: Option<DateTime<Utc>>,
}

impl RevokedDomainSet {
    /// An empty snapshot that was never fetched.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot from raw feed entries. Blank entries are dropped.
    pub fn from_domains<I, S>(domains: I, fetched_at: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let domains = domains
            .into_iter()
            .map(|d| normalize_domain(d.as_ref()))
            .filter(|d| !d.is_empty())
            .collect();
        Self {
            domains,
            fetched_at: Some(fetched_at),
        }
    }

    /// Whether `domain` is listed, after normalisation.
    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains(&normalize_domain(domain))
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// When the feed was fetched; `None` for the initial empty snapshot.
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }
}
