//! Revocation runtime: wires the engine to its collaborators.
//!
//! ## Startup Sequence
//!
//! 1. Validate configuration
//! 2. Load the static cascade (failure leaves it absent)
//! 3. One bounded revoked-domain feed refresh
//! 4. Spawn the periodic feed refresher
//!
//! ## Check Flow (per domain)
//!
//! 1. Look up the served certificate
//! 2. `observe(domain, serial)` into the overlay
//! 3. `decide(serial)`
//! 4. Apply the block policy

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use crlite_cascade::{
    BlockPolicy, BundledCascadeSource, CascadeSource, CertificateIntelligence,
    CertificateSignals, CrliteApiClient, FeedRefresher, FileCascadeSource, LookupError,
    RevocationApi, RevocationEngine,
};
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::NodeConfig;
use crate::report::{domain_from_input, CheckReport};

/// Cascade document compiled into the binary.
pub const BUNDLED_CASCADE: &[u8] = include_bytes!("../resources/cascade_filters.json");

/// How long `shutdown` waits for background tasks.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// The host runtime around one `RevocationEngine`.
pub struct RevocationRuntime {
    config: NodeConfig,
    engine: Arc<RevocationEngine>,
    client: Arc<CrliteApiClient>,
    cascade_source: Box<dyn CascadeSource>,
    policy: BlockPolicy,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
    started: AtomicBool,
}

impl RevocationRuntime {
    /// Create the runtime. Nothing is loaded or fetched until `start`.
    pub fn new(config: NodeConfig) -> Result<Self> {
        config.validate().context("Invalid node configuration")?;

        let engine = RevocationEngine::new(config.engine_config()?)
            .context("Failed to create revocation engine")?;
        let client = CrliteApiClient::with_timeout(&config.api.base_url, config.request_timeout())
            .context("Failed to build HTTP client")?;

        let cascade_source: Box<dyn CascadeSource> = match &config.cascade.path {
            Some(path) => Box::new(FileCascadeSource::new(path)),
            None => Box::new(BundledCascadeSource::from_static(
                "cascade_filters.json",
                BUNDLED_CASCADE,
            )),
        };

        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Ok(Self {
            policy: config.block_policy(),
            config,
            engine: Arc::new(engine),
            client: Arc::new(client),
            cascade_source,
            shutdown_tx,
            shutdown_rx,
            tasks: Mutex::new(Vec::new()),
            started: AtomicBool::new(false),
        })
    }

    /// Replace the cascade source chosen from configuration.
    pub fn with_cascade_source(mut self, source: Box<dyn CascadeSource>) -> Self {
        self.cascade_source = source;
        self
    }

    /// Load the cascade, refresh the feed once, spawn the refresher.
    ///
    /// Only the first call does anything; later calls return `Ok(())`.
    pub async fn start(&self) -> Result<()> {
        if self.started.swap(true, Ordering::SeqCst) {
            warn!("Revocation runtime already started");
            return Ok(());
        }

        info!(
            api_base = %self.client.base_url(),
            cascade = %self.cascade_source.describe(),
            block_revoked = self.policy.block_revoked,
            "Starting revocation runtime"
        );

        self.load_cascade().await;

        let refresher = FeedRefresher::new(Arc::clone(&self.client), Arc::clone(&self.engine))
            .with_interval(self.config.refresh_interval())
            .with_timeout(self.config.request_timeout())
            .skip_initial_refresh();

        // A failed first refresh is already logged; the node runs with an
        // empty snapshot until the next tick.
        let _ = refresher.refresh_once().await;

        let handle = tokio::spawn(refresher.run(self.shutdown_rx.clone()));
        self.tasks.lock().push(handle);

        info!("Revocation runtime running");
        Ok(())
    }

    /// Load the static cascade into the engine.
    ///
    /// Returns whether a cascade is now installed. Failure is logged and
    /// leaves the engine answering `Unknown` where the cascade would decide.
    pub async fn load_cascade(&self) -> bool {
        match self.cascade_source.load_cascade().await {
            Ok(cascade) => {
                self.engine.install_cascade(cascade);
                true
            }
            Err(e) => {
                warn!(
                    source = %self.cascade_source.describe(),
                    error = %e,
                    "Static cascade unavailable, continuing without it"
                );
                false
            }
        }
    }

    /// Check the certificate currently served for `input` (domain or URL).
    pub async fn check_domain(&self, input: &str) -> CheckReport {
        let Some(domain) = domain_from_input(input) else {
            return CheckReport::failed(input.trim(), "Missing domain");
        };

        let info = match self.client.lookup(&domain).await {
            Ok(info) => info,
            Err(e) => {
                warn!(domain = %domain, error = %e, "Certificate lookup failed");
                return CheckReport::failed(domain, e.to_string());
            }
        };

        let serial = info.serial().map(str::to_string);
        let (overlay, lookup_error) = match serial.as_deref() {
            Some(serial) => (self.engine.observe(&domain, serial), None),
            None => {
                let e = LookupError::MissingSerial(domain.clone());
                warn!(domain = %domain, "{}", e);
                (None, Some(e.to_string()))
            }
        };

        let verdict = self.engine.decide(serial.as_deref().unwrap_or(""));
        let signals = CertificateSignals::from_info(&info, Utc::now());
        let decision = self.policy.evaluate(signals, verdict);

        debug!(
            domain = %domain,
            verdict = %verdict,
            blocked = decision.block,
            "Domain checked"
        );

        CheckReport {
            domain,
            serial,
            verdict,
            status: decision.status(),
            blocked: decision.block,
            reasons: decision.reasons,
            overlay,
            certificate: Some(info),
            checked_at: Utc::now(),
            error: lookup_error,
        }
    }

    /// Signal background tasks and wait briefly for them to stop.
    pub async fn shutdown(&self) {
        info!("Initiating graceful shutdown...");

        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }

        let handles: Vec<JoinHandle<()>> = self.tasks.lock().drain(..).collect();
        for handle in handles {
            if tokio::time::timeout(SHUTDOWN_GRACE, handle).await.is_err() {
                warn!("Background task did not stop within the grace period");
            }
        }

        debug!(metrics = ?self.engine.metrics().snapshot(), "Final metrics");
        info!("Shutdown complete");
    }

    pub fn engine(&self) -> &Arc<RevocationEngine> {
        &self.engine
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn policy(&self) -> BlockPolicy {
        self.policy
    }
}
