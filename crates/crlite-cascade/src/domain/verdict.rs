//! Revocation verdicts

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of a revocation decision.
///
/// `Unknown` is the degraded answer for any missing input; it is never
/// upgraded to `NotRevoked`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Revoked")]
    Revoked,
    #[serde(rename = "Not Revoked")]
    NotRevoked,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl Verdict {
    pub fn from_revoked(revoked: bool) -> Self {
        if revoked {
            Verdict::Revoked
        } else {
            Verdict::NotRevoked
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Revoked => "Revoked",
            Verdict::NotRevoked => "Not Revoked",
            Verdict::Unknown => "Unknown",
        }
    }

    pub fn is_revoked(&self) -> bool {
        matches!(self, Verdict::Revoked)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
