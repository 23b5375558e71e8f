//! In-process stand-in for the revocation backend.
//!
//! Serves the two endpoints the node talks to:
//!
//! - `GET /revokedList` - JSON array of domains, or a configured failure
//! - `GET /cert?domain=` - configured certificate document; `400 Missing
//!   domain` without a domain, `500 {"error": ...}` for unknown domains,
//!   optionally delayed to exercise client timeouts

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use parking_lot::RwLock;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

#[derive(Default)]
struct BackendState {
    revoked: RwLock<Vec<String>>,
    feed_failure: RwLock<Option<StatusCode>>,
    certificates: RwLock<HashMap<String, Value>>,
    lookups: RwLock<Vec<String>>,
    cert_delay: RwLock<Option<Duration>>,
}

/// Running backend, stopped on drop.
pub struct MockBackend {
    addr: SocketAddr,
    state: Arc<BackendState>,
    handle: JoinHandle<()>,
}

impl MockBackend {
    /// Bind an ephemeral port on localhost and start serving.
    pub async fn spawn() -> std::io::Result<Self> {
        let state = Arc::new(BackendState::default());
        let router = Router::new()
            .route("/revokedList", get(revoked_list))
            .route("/cert", get(certificate))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self {
            addr,
            state,
            handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn set_revoked(&self, domains: &[&str]) {
        *self.state.revoked.write() = domains.iter().map(|d| d.to_string()).collect();
    }

    /// Make `/revokedList` answer with `status` until cleared.
    pub fn fail_feed(&self, status: Option<StatusCode>) {
        *self.state.feed_failure.write() = status;
    }

    pub fn insert_certificate(&self, domain: &str, document: Value) {
        self.state
            .certificates
            .write()
            .insert(domain.to_string(), document);
    }

    /// Hold every `/cert` response for `delay` until cleared.
    pub fn delay_certificates(&self, delay: Option<Duration>) {
        *self.state.cert_delay.write() = delay;
    }

    /// Domains requested from `/cert`, in order.
    pub fn lookups(&self) -> Vec<String> {
        self.state.lookups.read().clone()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Certificate document in the backend's wire format.
pub fn certificate_document(serial: &str, common_name: &str, valid_to: &str) -> Value {
    json!({
        "serialNumber": serial,
        "subject": { "CN": common_name },
        "issuer": { "CN": "Test Issuing CA", "O": "Test PKI" },
        "valid_from": "Jan  1 00:00:00 2024 GMT",
        "valid_to": valid_to,
        "isTrusted": true
    })
}

async fn revoked_list(State(state): State<Arc<BackendState>>) -> Response {
    if let Some(status) = *state.feed_failure.read() {
        return (status, Json(json!({ "error": "feed unavailable" }))).into_response();
    }
    Json(state.revoked.read().clone()).into_response()
}

#[derive(Deserialize)]
struct CertQuery {
    domain: Option<String>,
}

async fn certificate(
    State(state): State<Arc<BackendState>>,
    Query(query): Query<CertQuery>,
) -> Response {
    let Some(domain) = query.domain.filter(|d| !d.is_empty()) else {
        return (StatusCode::BAD_REQUEST, "Missing domain").into_response();
    };

    state.lookups.write().push(domain.clone());

    let delay = *state.cert_delay.read();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let document = state.certificates.read().get(&domain).cloned();
    match document {
        Some(document) => Json(document).into_response(),
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("getaddrinfo ENOTFOUND {}", domain) })),
        )
            .into_response(),
    }
}
