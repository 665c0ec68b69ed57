mod common;

use common::ucp_server::{self, CannedResponse};
use ucp_core::{AppConfig, ComplianceStatus, ComponentKey};
use ucp_scanner::{NormalizationError, ScanError, ScanOrchestrator};

fn orchestrator() -> ScanOrchestrator {
    let mut config = AppConfig::default();
    config.scanning.timeout_secs = 5;
    ScanOrchestrator::from_config(&config).expect("build orchestrator")
}

#[tokio::test]
async fn test_fully_compliant_site() {
    let server = ucp_server::start(vec![
        (
            "/robots.txt",
            CannedResponse::new(200, "User-agent: *\nAllow: /.well-known/ucp\n"),
        ),
        (
            "/.well-known/ucp",
            CannedResponse::new(200, r#"{"version":"1.0","ai_training":"opt-out"}"#),
        ),
        (
            "/",
            CannedResponse::new(200, "<html></html>").header("UCP-Config", "/.well-known/ucp"),
        ),
    ]);

    let report = orchestrator()
        .scan(&format!("{}/landing?utm=1", server.origin))
        .await
        .expect("scan succeeds");

    assert_eq!(report.target_origin, server.origin);
    assert_eq!(report.hostname, "127.0.0.1");
    assert_eq!(report.aggregate_score, 100);
    assert_eq!(report.compliance_status, ComplianceStatus::Compliant);
    assert!(report.components.iter().all(|c| c.passed));
}

#[tokio::test]
async fn test_site_without_ucp() {
    let server = ucp_server::start(vec![
        (
            "/robots.txt",
            CannedResponse::new(200, "User-agent: *\nDisallow: /admin\n"),
        ),
        ("/", CannedResponse::new(200, "<html></html>").header("Server", "nginx")),
    ]);

    let report = orchestrator()
        .scan(&server.origin)
        .await
        .expect("scan succeeds");

    assert_eq!(report.aggregate_score, 0);
    assert_eq!(report.compliance_status, ComplianceStatus::NonCompliant);
    assert_eq!(report.status_label, "NON-COMPLIANT");

    let config = report
        .component(ComponentKey::WellKnownConfig)
        .expect("config component");
    assert_eq!(config.finding, "UCP config missing or blocked (HTTP 404)");
    assert!(config
        .endpoint_detail
        .contains(&format!("Endpoint: {}/.well-known/ucp; Status: 404", server.origin)));
}

#[tokio::test]
async fn test_partial_site() {
    let server = ucp_server::start(vec![
        ("/robots.txt", CannedResponse::new(200, "# nothing\n")),
        ("/.well-known/ucp", CannedResponse::new(200, r#"{"version":"1.0"}"#)),
        ("/", CannedResponse::new(503, "maintenance")),
    ]);

    let report = orchestrator()
        .scan(&server.origin)
        .await
        .expect("scan succeeds");

    assert_eq!(report.aggregate_score, 50);
    assert_eq!(report.compliance_status, ComplianceStatus::Partial);
    assert_eq!(
        report.components[2].finding,
        "Homepage returned unexpected status (HTTP 503)"
    );
}

#[tokio::test]
async fn test_unreachable_site_still_yields_report() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("local addr").port()
    };

    let report = orchestrator()
        .scan(&format!("http://127.0.0.1:{port}"))
        .await
        .expect("scan succeeds");

    assert_eq!(report.aggregate_score, 0);
    assert_eq!(report.compliance_status, ComplianceStatus::NonCompliant);
    assert_eq!(report.components.len(), 3);
    assert_eq!(report.components[0].finding, "robots.txt unreachable or empty");
    assert_eq!(
        report.components[1].finding,
        "UCP config unreachable (timeout or error)"
    );
    assert_eq!(
        report.components[2].finding,
        "Homepage unreachable (timeout or error)"
    );
}

#[tokio::test]
async fn test_invalid_input_is_rejected() {
    let err = orchestrator().scan("").await.expect_err("empty input");
    assert!(matches!(
        err,
        ScanError::Normalization(NormalizationError::EmptyInput { .. })
    ));
}
