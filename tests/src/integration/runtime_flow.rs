//! # Runtime Check Flow
//!
//! ```text
//! check_domain ─→ /cert ─→ observe(domain, serial) ─→ decide(serial) ─→ policy
//!                                 ↑
//!                 /revokedList snapshot (loaded at start)
//! ```
//!
//! Serials below come from the bundled cascade with known classifications.

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::time::Duration;

    use axum::http::StatusCode;
    use crlite_cascade::{BlockReason, OverlayTarget, RevocationApi, Verdict};
    use crlite_node::{NodeConfig, RevocationRuntime};

    use crate::support::{certificate_document, MockBackend};

    const CASCADE_REVOKED: &str = "D928D44BCF0D58A3D7876E044E82499C";
    const CASCADE_VALID: &str = "292B08121010592FCFDD3E8C6148A825";
    const CASCADE_VALID_2: &str = "26FC79772C753CA0165346FFCBEA6A4E";
    const FUTURE: &str = "Jan  1 00:00:00 2099 GMT";
    const PAST: &str = "Jan  1 00:00:00 2020 GMT";

    fn config(backend: &MockBackend) -> NodeConfig {
        let mut config = NodeConfig::default();
        config.api.base_url = backend.base_url();
        config.api.request_timeout_secs = 5;
        config
    }

    async fn started(config: NodeConfig) -> RevocationRuntime {
        let runtime = RevocationRuntime::new(config).unwrap();
        runtime.start().await.unwrap();
        runtime
    }

    #[tokio::test]
    async fn test_start_loads_cascade_and_feed() {
        let backend = MockBackend::spawn().await.unwrap();
        backend.set_revoked(&["revoked.badssl.com"]);

        let runtime = started(config(&backend)).await;
        assert!(runtime.engine().has_cascade());
        assert!(runtime.engine().snapshot().contains("revoked.badssl.com"));

        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_second_start_is_ignored() {
        let backend = MockBackend::spawn().await.unwrap();
        backend.set_revoked(&["revoked.badssl.com"]);

        let runtime = started(config(&backend)).await;
        backend.set_revoked(&["other.example"]);
        runtime.start().await.unwrap();

        assert_eq!(runtime.engine().metrics().snapshot().feed_refreshes, 1);
        assert!(runtime.engine().snapshot().contains("revoked.badssl.com"));
        assert!(!runtime.engine().snapshot().contains("other.example"));

        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_start_survives_feed_failure() {
        let backend = MockBackend::spawn().await.unwrap();
        backend.fail_feed(Some(StatusCode::BAD_GATEWAY));

        backend.insert_certificate(
            "revoked.example",
            certificate_document(CASCADE_REVOKED, "revoked.example", FUTURE),
        );

        let runtime = started(config(&backend)).await;
        assert!(runtime.engine().snapshot().is_empty());
        assert!(runtime.engine().snapshot().fetched_at().is_none());
        assert_eq!(runtime.engine().metrics().snapshot().feed_failures, 1);

        // Without a fetched feed nothing is whitelisted, so the cascade decides.
        let report = runtime.check_domain("revoked.example").await;
        assert_eq!(report.overlay, None);
        assert_eq!(report.verdict, Verdict::Revoked);
        assert!(report.blocked);
        assert_eq!(runtime.engine().decide(CASCADE_REVOKED), Verdict::Revoked);

        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_listed_domain_is_revoked_and_blocked() {
        let backend = MockBackend::spawn().await.unwrap();
        backend.set_revoked(&["revoked.badssl.com"]);
        backend.insert_certificate(
            "revoked.badssl.com",
            certificate_document(CASCADE_VALID, "revoked.badssl.com", FUTURE),
        );

        let runtime = started(config(&backend)).await;
        let report = runtime.check_domain("revoked.badssl.com").await;

        assert_eq!(report.serial.as_deref(), Some(CASCADE_VALID));
        assert_eq!(report.overlay, Some(OverlayTarget::RevokedRecent));
        assert_eq!(report.verdict, Verdict::Revoked);
        assert_eq!(report.status, Verdict::Revoked);
        assert!(report.blocked);
        assert_eq!(report.reasons, vec![BlockReason::CascadeRevoked]);
        assert!(report.error.is_none());

        // The overlay now outranks the cascade for this serial.
        assert_eq!(runtime.engine().decide(CASCADE_VALID), Verdict::Revoked);

        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_unlisted_domain_whitelists_cascade_revoked_serial() {
        let backend = MockBackend::spawn().await.unwrap();
        backend.set_revoked(&["other.example"]);
        backend.insert_certificate(
            "example.com",
            certificate_document(CASCADE_REVOKED, "example.com", FUTURE),
        );

        let runtime = started(config(&backend)).await;
        assert_eq!(runtime.engine().decide(CASCADE_REVOKED), Verdict::Revoked);

        let report = runtime.check_domain("example.com").await;
        assert_eq!(report.overlay, Some(OverlayTarget::WhitelistedRecent));
        assert_eq!(report.verdict, Verdict::NotRevoked);
        assert_eq!(report.status, Verdict::NotRevoked);
        assert!(!report.blocked);

        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_expired_certificate_is_blocked() {
        let backend = MockBackend::spawn().await.unwrap();
        backend.insert_certificate(
            "expired.badssl.com",
            certificate_document(CASCADE_VALID_2, "expired.badssl.com", PAST),
        );

        let runtime = started(config(&backend)).await;
        let report = runtime.check_domain("expired.badssl.com").await;

        assert_eq!(report.verdict, Verdict::NotRevoked);
        assert!(report.blocked);
        assert_eq!(report.reasons, vec![BlockReason::Expired]);
        assert_eq!(report.status, Verdict::Revoked);

        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_block_revoked_disabled_only_blocks_expiry() {
        let backend = MockBackend::spawn().await.unwrap();
        backend.set_revoked(&["revoked.badssl.com"]);
        backend.insert_certificate(
            "revoked.badssl.com",
            certificate_document(CASCADE_VALID, "revoked.badssl.com", FUTURE),
        );

        let mut config = config(&backend);
        config.policy.block_revoked = false;
        let runtime = started(config).await;

        let report = runtime.check_domain("revoked.badssl.com").await;
        assert_eq!(report.verdict, Verdict::Revoked);
        assert!(!report.blocked);
        assert_eq!(report.status, Verdict::NotRevoked);

        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_url_input_is_reduced_to_domain() {
        let backend = MockBackend::spawn().await.unwrap();
        backend.insert_certificate(
            "github.com",
            certificate_document(CASCADE_VALID, "github.com", FUTURE),
        );

        let runtime = started(config(&backend)).await;
        let report = runtime.check_domain("https://www.GitHub.com/rust-lang").await;

        assert_eq!(report.domain, "github.com");
        assert_eq!(backend.lookups(), vec!["github.com"]);
        assert!(report.error.is_none());

        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_lookup_failure_reports_unknown() {
        let backend = MockBackend::spawn().await.unwrap();
        let runtime = started(config(&backend)).await;

        let report = runtime.check_domain("nowhere.invalid").await;
        assert_eq!(report.verdict, Verdict::Unknown);
        assert_eq!(report.status, Verdict::Unknown);
        assert!(!report.blocked);
        assert!(report.certificate.is_none());
        assert!(report.error.unwrap().contains("ENOTFOUND"));

        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_lookup_timeout_reports_unknown() {
        let backend = MockBackend::spawn().await.unwrap();
        backend.insert_certificate(
            "slow.example",
            certificate_document(CASCADE_REVOKED, "slow.example", PAST),
        );
        backend.delay_certificates(Some(Duration::from_secs(3)));

        let mut config = config(&backend);
        config.api.request_timeout_secs = 1;
        let runtime = started(config).await;

        let report = runtime.check_domain("slow.example").await;
        assert_eq!(report.verdict, Verdict::Unknown);
        assert_eq!(report.status, Verdict::Unknown);
        assert!(!report.blocked);
        assert!(report.certificate.is_none());
        assert_eq!(report.error.as_deref(), Some("Timeout"));

        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_missing_serial_is_unknown_verdict() {
        let backend = MockBackend::spawn().await.unwrap();
        let mut document = certificate_document("", "noserial.example", FUTURE);
        document["serialNumber"] = serde_json::Value::Null;
        backend.insert_certificate("noserial.example", document);

        let runtime = started(config(&backend)).await;
        let report = runtime.check_domain("noserial.example").await;

        assert!(report.serial.is_none());
        assert_eq!(report.verdict, Verdict::Unknown);
        assert!(report.overlay.is_none());
        assert!(report.certificate.is_some());
        assert!(report.error.unwrap().contains("no serial number"));

        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_cascade_file_from_config() {
        let backend = MockBackend::spawn().await.unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(include_bytes!("../../fixtures/cascade_filters.json"))
            .unwrap();

        let mut config = config(&backend);
        config.cascade.path = Some(file.path().to_path_buf());
        let runtime = RevocationRuntime::new(config).unwrap();

        assert!(runtime.load_cascade().await);
        assert_eq!(runtime.engine().cascade().unwrap().depth(), 5);
    }

    #[tokio::test]
    async fn test_report_json_shape() {
        let backend = MockBackend::spawn().await.unwrap();
        backend.insert_certificate(
            "example.com",
            certificate_document(CASCADE_VALID, "example.com", FUTURE),
        );

        let runtime = started(config(&backend)).await;
        let report = runtime.check_domain("example.com").await;
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["domain"], "example.com");
        assert_eq!(json["verdict"], "Not Revoked");
        assert_eq!(json["overlay"], "whitelisted_recent");
        assert_eq!(json["certificate"]["serialNumber"], CASCADE_VALID);

        runtime.shutdown().await;
    }
}
