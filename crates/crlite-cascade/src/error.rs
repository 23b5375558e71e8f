//! Error types for the revocation cascade

use std::path::PathBuf;

use thiserror::Error;

/// Invalid parameters handed to a constructor.
///
/// These are programming or build errors and must be surfaced, never
/// swallowed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("Filter size must be positive")]
    ZeroSize,

    #[error("Hash count must be positive")]
    ZeroHashCount,

    #[error("Cascade must contain at least one level")]
    EmptyCascade,
}

/// Failure to obtain a usable static cascade.
///
/// Non-fatal for the host: the engine keeps running without a cascade and
/// answers `Unknown` where the cascade would have been consulted.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read cascade from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed cascade document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Bit array length {actual} does not match filter size {expected}")]
    BitLengthMismatch { expected: usize, actual: usize },

    #[error("Invalid filter parameters: {0}")]
    Invalid(#[from] ConstructionError),
}

/// Failure to refresh the revoked-domain feed.
///
/// The previous snapshot stays in place.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed returned status {0}")]
    Status(u16),

    #[error("Failed to parse feed: {0}")]
    Parse(String),

    #[error("Timeout")]
    Timeout,
}

/// Failure of a certificate lookup against the intelligence collaborator.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Lookup returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to parse certificate: {0}")]
    Parse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Certificate for {0} carries no serial number")]
    MissingSerial(String),
}
