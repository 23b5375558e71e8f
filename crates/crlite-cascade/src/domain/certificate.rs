//! Certificate intelligence document and blocking policy
//!
//! The revocation verdict is one signal among several. The certificate
//! lookup also reports expiry and trust; the host combines them here.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::verdict::Verdict;

/// Certificate details as returned by `GET /cert?domain=<name>`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateInfo {
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub subject: Option<Map<String, Value>>,
    #[serde(default)]
    pub issuer: Option<Map<String, Value>>,
    #[serde(default, rename = "valid_from")]
    pub valid_from: Option<String>,
    #[serde(default, rename = "valid_to")]
    pub valid_to: Option<String>,
    #[serde(default)]
    pub is_expired: Option<bool>,
    #[serde(default)]
    pub is_revoked: Option<bool>,
    #[serde(default)]
    pub is_trusted: Option<bool>,
    #[serde(default)]
    pub trust_error: Option<String>,
}

impl CertificateInfo {
    /// Serial number if present and non-blank.
    pub fn serial(&self) -> Option<&str> {
        self.serial_number
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Subject common name
    pub fn subject_cn(&self) -> Option<&str> {
        common_name(self.subject.as_ref())
    }

    /// Issuer common name
    pub fn issuer_cn(&self) -> Option<&str> {
        common_name(self.issuer.as_ref())
    }

    /// Parsed `valid_to`, if it is in a recognised format.
    pub fn not_after(&self) -> Option<DateTime<Utc>> {
        self.valid_to.as_deref().and_then(parse_certificate_time)
    }
}

fn common_name(name: Option<&Map<String, Value>>) -> Option<&str> {
    name?.get("CN")?.as_str()
}

/// Parse the time formats certificate services emit.
///
/// Accepts the OpenSSL form (`Mar  5 12:00:00 2025 GMT`), RFC 2822 and
/// RFC 3339.
pub fn parse_certificate_time(raw: &str) -> Option<DateTime<Utc>> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    if let Ok(naive) = NaiveDateTime::parse_from_str(&collapsed, "%b %d %H:%M:%S %Y GMT") {
        return Some(naive.and_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(&collapsed) {
        return Some(dt.with_timezone(&Utc));
    }
    DateTime::parse_from_rfc3339(&collapsed)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Boolean signals extracted from a certificate lookup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CertificateSignals {
    pub expired: bool,
    pub revoked: bool,
    pub untrusted: bool,
}

impl CertificateSignals {
    /// Derive signals as of `now`. An unparseable `valid_to` is not expiry.
    pub fn from_info(info: &CertificateInfo, now: DateTime<Utc>) -> Self {
        let expired = info.is_expired == Some(true)
            || info.not_after().map(|t| t < now).unwrap_or(false);
        Self {
            expired,
            revoked: info.is_revoked == Some(true),
            untrusted: info.is_trusted == Some(false),
        }
    }
}

/// Why a certificate was blocked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    Expired,
    ReportedRevoked,
    Untrusted,
    CascadeRevoked,
}

impl BlockReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockReason::Expired => "expired",
            BlockReason::ReportedRevoked => "reported_revoked",
            BlockReason::Untrusted => "untrusted",
            BlockReason::CascadeRevoked => "cascade_revoked",
        }
    }
}

/// Result of applying a [`BlockPolicy`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BlockDecision {
    pub block: bool,
    pub reasons: Vec<BlockReason>,
}

impl BlockDecision {
    /// Status shown to the user: `Revoked` when blocking.
    pub fn status(&self) -> Verdict {
        Verdict::from_revoked(self.block)
    }
}

/// Host policy for combining certificate signals with the engine verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockPolicy {
    /// Block on revocation and trust signals, not just expiry.
    pub block_revoked: bool,
}

impl Default for BlockPolicy {
    fn default() -> Self {
        Self {
            block_revoked: true,
        }
    }
}

impl BlockPolicy {
    /// Expiry always blocks; the remaining signals only with `block_revoked`.
    pub fn evaluate(&self, signals: CertificateSignals, verdict: Verdict) -> BlockDecision {
        let mut reasons = Vec::new();
        if signals.expired {
            reasons.push(BlockReason::Expired);
        }
        if self.block_revoked {
            if signals.revoked {
                reasons.push(BlockReason::ReportedRevoked);
            }
            if signals.untrusted {
                reasons.push(BlockReason::Untrusted);
            }
            if verdict.is_revoked() {
                reasons.push(BlockReason::CascadeRevoked);
            }
        }

        BlockDecision {
            block: !reasons.is_empty(),
            reasons,
        }
    }
}
