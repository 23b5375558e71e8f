//! Tracing subscriber setup.
//!
//! The filter directive comes from `LoggingConfig::level`, which already
//! folds in `CRLITE_LOG_LEVEL` and `RUST_LOG`. JSON output is one object per
//! line; the default is human-readable. Logs go to stderr so reports on
//! stdout stay machine-readable.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_new(&config.level)?;

    if config.json {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_writer(std::io::stderr);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_writer(std::io::stderr);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
