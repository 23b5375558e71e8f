//! Inbound Ports (Driving Ports)
//!
//! The only surface a host needs: ask for a verdict, and report each
//! freshly fetched certificate.

use crate::domain::{OverlayTarget, Verdict};

/// Primary revocation API (Driving Port)
pub trait RevocationApi: Send + Sync {
    /// Decide the revocation status of a certificate serial number.
    ///
    /// Priority: dynamic whitelist, dynamic revoked, static cascade, unknown.
    /// An empty serial is `Unknown`.
    fn decide(&self, serial: &str) -> Verdict;

    /// Record a freshly observed `(domain, serial)` pair in the overlay.
    ///
    /// Returns the filter the serial was added to, or `None` when the serial
    /// is empty and nothing was recorded.
    fn observe(&self, domain: &str, serial: &str) -> Option<OverlayTarget>;
}
