//! # HTTP Adapter Integration
//!
//! `CrliteApiClient` and `FeedRefresher` against the in-process backend.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::http::StatusCode;
    use crlite_cascade::{
        CertificateIntelligence, CrliteApiClient, EngineConfig, FeedError, FeedRefresher,
        LookupError, RevocationEngine, RevokedDomainFeed,
    };

    use crate::support::{certificate_document, MockBackend};

    async fn setup() -> (MockBackend, CrliteApiClient) {
        let backend = MockBackend::spawn().await.unwrap();
        let client =
            CrliteApiClient::with_timeout(backend.base_url(), Duration::from_secs(5)).unwrap();
        (backend, client)
    }

    #[tokio::test]
    async fn test_fetch_revoked_domains() {
        let (backend, client) = setup().await;
        backend.set_revoked(&["expired.badssl.com", "revoked.badssl.com"]);

        let domains = client.fetch_revoked_domains().await.unwrap();
        assert_eq!(domains, vec!["expired.badssl.com", "revoked.badssl.com"]);
    }

    #[tokio::test]
    async fn test_feed_failure_status() {
        let (backend, client) = setup().await;
        backend.fail_feed(Some(StatusCode::SERVICE_UNAVAILABLE));

        let err = client.fetch_revoked_domains().await.unwrap_err();
        assert!(matches!(err, FeedError::Status(503)));
    }

    #[tokio::test]
    async fn test_lookup_certificate() {
        let (backend, client) = setup().await;
        backend.insert_certificate(
            "example.com",
            certificate_document("04E1A73C", "example.com", "Jan  1 00:00:00 2099 GMT"),
        );

        let info = client.lookup("example.com").await.unwrap();
        assert_eq!(info.serial(), Some("04E1A73C"));
        assert_eq!(info.subject_cn(), Some("example.com"));
        assert_eq!(info.issuer_cn(), Some("Test Issuing CA"));
        assert_eq!(info.is_trusted, Some(true));
        assert_eq!(backend.lookups(), vec!["example.com"]);
    }

    #[tokio::test]
    async fn test_lookup_query_is_encoded() {
        let (backend, client) = setup().await;
        let odd = "a&b=c.example";

        let _ = client.lookup(odd).await;
        assert_eq!(backend.lookups(), vec![odd]);
    }

    #[tokio::test]
    async fn test_lookup_missing_domain_is_400() {
        let (_backend, client) = setup().await;

        match client.lookup("").await {
            Err(LookupError::Status { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "Missing domain");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_lookup_backend_error_carries_message() {
        let (_backend, client) = setup().await;

        match client.lookup("nowhere.invalid").await {
            Err(LookupError::Status { status, message }) => {
                assert_eq!(status, 500);
                assert!(message.contains("ENOTFOUND"), "message: {}", message);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_slow_lookup_times_out() {
        let backend = MockBackend::spawn().await.unwrap();
        backend.insert_certificate(
            "slow.example",
            certificate_document("0A", "slow.example", "Jan  1 00:00:00 2099 GMT"),
        );
        backend.delay_certificates(Some(Duration::from_secs(3)));
        let client =
            CrliteApiClient::with_timeout(backend.base_url(), Duration::from_secs(1)).unwrap();

        assert!(matches!(
            client.lookup("slow.example").await,
            Err(LookupError::Timeout)
        ));
    }

    #[tokio::test]
    async fn test_refresher_swaps_engine_snapshot() {
        let (backend, client) = setup().await;
        backend.set_revoked(&["www.GitHub.com", "expired.badssl.com"]);

        let engine = Arc::new(RevocationEngine::new(EngineConfig::default()).unwrap());
        let refresher = FeedRefresher::new(Arc::new(client), Arc::clone(&engine));

        assert_eq!(refresher.refresh_once().await.unwrap(), 2);
        assert!(engine.snapshot().contains("github.com"));

        backend.fail_feed(Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(refresher.refresh_once().await.is_err());
        assert!(engine.snapshot().contains("expired.badssl.com"));

        let metrics = engine.metrics().snapshot();
        assert_eq!(metrics.feed_refreshes, 1);
        assert_eq!(metrics.feed_failures, 1);
    }
}
