//! Periodic revoked-domain feed refresh
//!
//! Runs beside the query path and never blocks it: each fetch is bounded by
//! a timeout, a success swaps the engine's snapshot, a failure keeps the
//! previous snapshot and is only logged and counted. No retries here.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::time::{interval_at, timeout, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::domain::RevokedDomainSet;
use crate::error::FeedError;
use crate::ports::RevokedDomainFeed;
use crate::service::RevocationEngine;

/// Recommended refresh interval
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Default bound on a single fetch
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Repeating task that keeps the engine's revoked-domain snapshot fresh.
pub struct FeedRefresher<F: RevokedDomainFeed> {
    feed: Arc<F>,
    engine: Arc<RevocationEngine>,
    refresh_interval: Duration,
    fetch_timeout: Duration,
    initial_refresh: bool,
}

impl<F: RevokedDomainFeed> FeedRefresher<F> {
    pub fn new(feed: Arc<F>, engine: Arc<RevocationEngine>) -> Self {
        Self {
            feed,
            engine,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            initial_refresh: true,
        }
    }

    pub fn with_interval(mut self, refresh_interval: Duration) -> Self {
        self.refresh_interval = refresh_interval;
        self
    }

    pub fn with_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    /// Wait one interval before the first fetch in `run`.
    ///
    /// For hosts that already called `refresh_once` during startup.
    pub fn skip_initial_refresh(mut self) -> Self {
        self.initial_refresh = false;
        self
    }

    /// Fetch once and swap the snapshot on success.
    ///
    /// Returns the number of domains in the new snapshot.
    pub async fn refresh_once(&self) -> Result<usize, FeedError> {
        let result = match timeout(self.fetch_timeout, self.feed.fetch_revoked_domains()).await {
            Ok(result) => result,
            Err(_) => Err(FeedError::Timeout),
        };

        match result {
            Ok(domains) => {
                let snapshot = RevokedDomainSet::from_domains(domains, Utc::now());
                let count = snapshot.len();
                self.engine.replace_snapshot(snapshot);
                self.engine.metrics().record_feed_refresh();
                info!(domains = count, "Revoked-domain feed refreshed");
                Ok(count)
            }
            Err(e) => {
                self.engine.metrics().record_feed_failure();
                warn!(
                    error = %e,
                    stale_domains = self.engine.snapshot().len(),
                    "Revoked-domain feed refresh failed, keeping previous snapshot"
                );
                Err(e)
            }
        }
    }

    /// Refresh immediately, then every `refresh_interval` until shutdown.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let first = if self.initial_refresh {
            Instant::now()
        } else {
            Instant::now() + self.refresh_interval
        };
        let mut ticker = interval_at(first, self.refresh_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            interval_secs = self.refresh_interval.as_secs(),
            "Feed refresher started"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    // Failures are already logged and counted.
                    let _ = self.refresh_once().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        debug!("Feed refresher shutting down");
                        break;
                    }
                }
            }
        }
    }
}
