//! Draft history retrieval against a mocked backend (wiremock)

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sdr_console::config::ConsoleConfig;
use sdr_console::history::{HistorySource, HttpHistory};
use sdr_console::ConsoleError;

// =============================================================================
// HELPERS
// =============================================================================

async fn mount_history(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/api/history"))
        .respond_with(response)
        .mount(server)
        .await;
}

fn history_for(server: &MockServer) -> HttpHistory {
    let mut config = ConsoleConfig::default();
    config.set_server_url(&server.uri()).unwrap();
    HttpHistory::new(config.history_url().unwrap())
}

// =============================================================================
// HTTP HISTORY
// =============================================================================

#[tokio::test]
async fn test_history_array() {
    let server = MockServer::start().await;
    mount_history(
        &server,
        ResponseTemplate::new(200).set_body_json(json!([
            {"company": "Acme", "person": "Dana", "email_subject": "Hi"},
            {"company": null, "pain_points": ["slow intake"]},
            {"company": "Beta", "unexpected": true},
            {"company": "Gamma", "pain_points": null, "hypothesis": null}
        ])),
    )
    .await;

    let records = history_for(&server).fetch().await.unwrap();

    assert_eq!(records.len(), 4);
    assert_eq!(records[0].company.as_deref(), Some("Acme"));
    assert_eq!(records[1].company_or_default(), "Unknown Company");
    assert_eq!(records[1].pain_points, vec!["slow intake".to_string()]);
    assert_eq!(records[2].person_or_default(), "Unknown Person");
    assert!(records[3].pain_points.is_empty());
}

#[tokio::test]
async fn test_history_null_is_empty() {
    let server = MockServer::start().await;
    mount_history(&server, ResponseTemplate::new(200).set_body_json(json!(null))).await;

    let records = history_for(&server).fetch().await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_history_server_error() {
    let server = MockServer::start().await;
    mount_history(&server, ResponseTemplate::new(500)).await;

    let source = history_for(&server);
    let err = source.fetch().await.unwrap_err();
    assert!(matches!(err, ConsoleError::HistoryFetch(_)));
    assert!(err.to_string().starts_with("SDR-030"));

    assert!(source.fetch_or_empty().await.is_empty());
}

#[tokio::test]
async fn test_history_malformed_body() {
    let server = MockServer::start().await;
    mount_history(
        &server,
        ResponseTemplate::new(200).set_body_string("<html>oops</html>"),
    )
    .await;

    assert!(history_for(&server).fetch_or_empty().await.is_empty());
}

#[test]
fn test_history_url_joins_base() {
    let mut config = ConsoleConfig::default();
    config.set_server_url("http://10.0.0.5:9000").unwrap();
    assert_eq!(
        config.history_url().unwrap().as_str(),
        "http://10.0.0.5:9000/api/history"
    );
}

// =============================================================================
// CLI
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_history_command_prints_drafts() {
    let server = MockServer::start().await;
    mount_history(
        &server,
        ResponseTemplate::new(200).set_body_json(json!([
            {"company": "Acme", "person": "Dana", "email_subject": "Quick idea for Acme"},
            {"company": "Beta"}
        ])),
    )
    .await;

    let uri = server.uri();
    let assert = tokio::task::spawn_blocking(move || {
        Command::cargo_bin("sdr-console")
            .unwrap()
            .env_remove("SDR_SERVER_URL")
            .args(["--server", &uri, "history"])
            .assert()
    })
    .await
    .unwrap();

    assert
        .success()
        .stdout(predicate::str::contains("2 drafts"))
        .stdout(predicate::str::contains("Acme"))
        .stdout(predicate::str::contains("Quick idea for Acme"))
        .stdout(predicate::str::contains("Unknown Person"));
}
