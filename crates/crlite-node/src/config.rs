//! # Node Configuration
//!
//! Defaults, overridden by environment variables, overridden by CLI flags.
//!
//! | Variable                      | Default                 |
//! |-------------------------------|-------------------------|
//! | `CRLITE_API_BASE`             | `http://localhost:3000` |
//! | `CRLITE_REQUEST_TIMEOUT_SECS` | `5`                     |
//! | `CRLITE_REFRESH_SECS`         | `600`                   |
//! | `CRLITE_CASCADE_PATH`         | bundled cascade         |
//! | `CRLITE_BLOCK_REVOKED`        | `true`                  |
//! | `CRLITE_OVERLAY_SIZE`         | `1000`                  |
//! | `CRLITE_OVERLAY_HASH_COUNT`   | `4`                     |
//! | `CRLITE_LOG_LEVEL`/`RUST_LOG` | `info`                  |
//! | `CRLITE_JSON_LOGS`            | `false`                 |
//!
//! Malformed values fall back to the default with a warning.

use std::path::PathBuf;
use std::time::Duration;

use crlite_cascade::domain::config::{DEFAULT_OVERLAY_HASH_COUNT, DEFAULT_OVERLAY_SIZE};
use crlite_cascade::{BlockPolicy, ConstructionError, EngineConfig};
use thiserror::Error;
use tracing::warn;

/// Complete node configuration.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    pub api: ApiConfig,
    pub feed: FeedConfig,
    pub cascade: CascadeConfig,
    pub policy: PolicyConfig,
    pub overlay: OverlayConfig,
    pub logging: LoggingConfig,
}

/// Revocation backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            request_timeout_secs: 5,
        }
    }
}

/// Revoked-domain feed refresh.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub refresh_interval_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 600,
        }
    }
}

/// Static cascade location. `None` uses the bundled document.
#[derive(Debug, Clone, Default)]
pub struct CascadeConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct PolicyConfig {
    pub block_revoked: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            block_revoked: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OverlayConfig {
    pub size: usize,
    pub hash_count: usize,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_OVERLAY_SIZE,
            hash_count: DEFAULT_OVERLAY_HASH_COUNT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directive
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API base URL must start with http:// or https://, got {0:?}")]
    InvalidBaseUrl(String),

    #[error("Request timeout must be positive")]
    ZeroRequestTimeout,

    #[error("Feed refresh interval must be positive")]
    ZeroRefreshInterval,

    #[error("Invalid overlay parameters: {0}")]
    Overlay(#[from] ConstructionError),
}

impl NodeConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base) = lookup("CRLITE_API_BASE") {
            config.api.base_url = base;
        }
        if let Some(secs) = parse_var(&lookup, "CRLITE_REQUEST_TIMEOUT_SECS") {
            config.api.request_timeout_secs = secs;
        }
        if let Some(secs) = parse_var(&lookup, "CRLITE_REFRESH_SECS") {
            config.feed.refresh_interval_secs = secs;
        }
        if let Some(path) = lookup("CRLITE_CASCADE_PATH").filter(|p| !p.trim().is_empty()) {
            config.cascade.path = Some(PathBuf::from(path));
        }
        if let Some(flag) = lookup("CRLITE_BLOCK_REVOKED") {
            config.policy.block_revoked = parse_flag(&flag, true);
        }
        if let Some(size) = parse_var(&lookup, "CRLITE_OVERLAY_SIZE") {
            config.overlay.size = size;
        }
        if let Some(count) = parse_var(&lookup, "CRLITE_OVERLAY_HASH_COUNT") {
            config.overlay.hash_count = count;
        }
        if let Some(level) = lookup("CRLITE_LOG_LEVEL").or_else(|| lookup("RUST_LOG")) {
            config.logging.level = level;
        }
        if let Some(flag) = lookup("CRLITE_JSON_LOGS") {
            config.logging.json = parse_flag(&flag, false);
        }

        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.api.base_url.to_ascii_lowercase();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.api.base_url.clone()));
        }
        if self.api.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroRequestTimeout);
        }
        if self.feed.refresh_interval_secs == 0 {
            return Err(ConfigError::ZeroRefreshInterval);
        }
        self.engine_config()?;
        Ok(())
    }

    pub fn engine_config(&self) -> Result<EngineConfig, ConstructionError> {
        EngineConfig::new(self.overlay.size, self.overlay.hash_count)
    }

    pub fn block_policy(&self) -> BlockPolicy {
        BlockPolicy {
            block_revoked: self.policy.block_revoked,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_secs)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.feed.refresh_interval_secs)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(var = key, value = %raw, "Ignoring malformed environment value");
            None
        }
    }
}

fn parse_flag(raw: &str, default: bool) -> bool {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}
