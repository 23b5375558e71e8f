//! HTTP client for the revocation backend.
//!
//! Two endpoints:
//!
//! - `GET /revokedList` returns a JSON array of domain names
//! - `GET /cert?domain=<name>` returns the certificate served for `name`,
//!   or `{ "error": "..." }` with a non-2xx status

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::debug;

use crate::domain::CertificateInfo;
use crate::error::{FeedError, LookupError};
use crate::ports::{CertificateIntelligence, RevokedDomainFeed};

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for the revocation backend.
#[derive(Clone, Debug)]
pub struct CrliteApiClient {
    client: Client,
    base_url: String,
}

impl CrliteApiClient {
    /// Create a client with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(2)))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl RevokedDomainFeed for CrliteApiClient {
    async fn fetch_revoked_domains(&self) -> Result<Vec<String>, FeedError> {
        let url = self.endpoint("revokedList");
        debug!(url = %url, "Fetching revoked domains");

        let response = self.client.get(&url).send().await.map_err(feed_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        response
            .json::<Vec<String>>()
            .await
            .map_err(|e| FeedError::Parse(e.to_string()))
    }
}

#[async_trait]
impl CertificateIntelligence for CrliteApiClient {
    async fn lookup(&self, domain: &str) -> Result<CertificateInfo, LookupError> {
        let url = self.endpoint("cert");
        debug!(url = %url, domain = domain, "Looking up certificate");

        let response = self
            .client
            .get(&url)
            .query(&[("domain", domain)])
            .send()
            .await
            .map_err(lookup_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                status: status.as_u16(),
                message: error_message(response).await,
            });
        }

        response
            .json::<CertificateInfo>()
            .await
            .map_err(|e| LookupError::Parse(e.to_string()))
    }
}

fn feed_error(e: reqwest::Error) -> FeedError {
    if e.is_timeout() {
        FeedError::Timeout
    } else {
        FeedError::Http(e)
    }
}

fn lookup_error(e: reqwest::Error) -> LookupError {
    if e.is_timeout() {
        LookupError::Timeout
    } else {
        LookupError::Http(e)
    }
}

/// Message from an `{ "error": ... }` body, falling back to the raw text.
async fn error_message(response: Response) -> String {
    let text = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => body.error,
        Err(_) => text,
    }
}
