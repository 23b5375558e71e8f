//! Per-domain check result and domain input handling.

use chrono::{DateTime, Utc};
use crlite_cascade::{normalize_domain, BlockReason, CertificateInfo, OverlayTarget, Verdict};
use serde::Serialize;

/// Outcome of checking one domain.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub domain: String,
    pub serial: Option<String>,
    /// Engine verdict for the serial alone
    pub verdict: Verdict,
    /// Status after applying the block policy
    pub status: Verdict,
    pub blocked: bool,
    pub reasons: Vec<BlockReason>,
    /// Overlay filter the serial was recorded in
    pub overlay: Option<OverlayTarget>,
    pub certificate: Option<CertificateInfo>,
    pub checked_at: DateTime<Utc>,
    pub error: Option<String>,
}

impl CheckReport {
    /// Report for a check that could not obtain a certificate.
    pub fn failed(domain: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            serial: None,
            verdict: Verdict::Unknown,
            status: Verdict::Unknown,
            blocked: false,
            reasons: Vec::new(),
            overlay: None,
            certificate: None,
            checked_at: Utc::now(),
            error: Some(error.into()),
        }
    }

    /// One-line human-readable summary.
    pub fn summary(&self) -> String {
        let mut line = format!(
            "{}  serial={}  verdict={}  status={}",
            self.domain,
            self.serial.as_deref().unwrap_or("-"),
            self.verdict,
            self.status
        );
        if self.blocked {
            let reasons: Vec<&str> = self.reasons.iter().map(BlockReason::as_str).collect();
            line.push_str(&format!("  BLOCKED ({})", reasons.join(", ")));
        }
        if let Some(error) = &self.error {
            line.push_str(&format!("  error: {}", error));
        }
        line
    }
}

/// Reduce user input (bare domain or URL) to a normalised domain name.
///
/// Returns `None` when nothing usable remains.
pub fn domain_from_input(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let host = if trimmed.contains("://") {
        reqwest::Url::parse(trimmed).ok()?.host_str()?.to_string()
    } else {
        let end = trimmed.find(['/', '?', '#']).unwrap_or(trimmed.len());
        let authority = &trimmed[..end];
        match authority.rsplit_once(':') {
            Some((host, port)) if !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()) => {
                host.to_string()
            }
            _ => authority.to_string(),
        }
    };

    let domain = normalize_domain(&host);
    if domain.is_empty() {
        None
    } else {
        Some(domain)
    }
}
