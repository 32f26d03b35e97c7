//! Integration tests for `cvchat reset`.


use assert_cmd::cargo::cargo_bin_cmd;
use fixtures::can_bind_localhost;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_reset_posts_chat_id() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/session/reset"))
        .and(body_json(json!({ "chatId": "abc" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("cvchat")
        .env("CVCHAT_HOME", home.path())
        .env("CVCHAT_BASE_URL", server.uri())
        .args(["--chat-id", "abc", "reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("New session started"));
}

#[tokio::test]
async fn test_reset_reports_failure() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/session/reset"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    cargo_bin_cmd!("cvchat")
        .env("CVCHAT_HOME", home.path())
        .env("CVCHAT_BASE_URL", server.uri())
        .args(["--chat-id", "abc", "reset"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to reset session: HTTP 404"));
}

#[test]
fn test_reset_requires_chat_id() {
    let home = TempDir::new().unwrap();

    cargo_bin_cmd!("cvchat")
        .env("CVCHAT_HOME", home.path())
        .arg("reset")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No chat id to reset"));
}
