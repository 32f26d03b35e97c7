//! Integration tests for `cvchat send` against a mock chat service.


use assert_cmd::cargo::cargo_bin_cmd;
use fixtures::{can_bind_localhost, ndjson_response, resume_stream};
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn temp_home() -> TempDir {
    TempDir::new().expect("create temp cvchat home")
}

#[tokio::test]
async fn test_send_prints_reply_thinking_and_attachment() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({
            "messages": [{ "role": "user", "content": "Tailor my resume" }],
            "data": { "attachments": [{
                "url": "https://files.example/cv.pdf",
                "name": "cv.pdf",
                "contentType": "application/pdf"
            }] },
            "chatId": "001"
        })))
        .respond_with(ndjson_response(&resume_stream("Your resume is ready.")))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("cvchat")
        .env("CVCHAT_HOME", home.path())
        .env("CVCHAT_BASE_URL", server.uri())
        .args([
            "--chat-id",
            "001",
            "send",
            "--prompt",
            "Tailor my resume",
            "--attach",
            "https://files.example/cv.pdf",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Your resume is ready."))
        .stdout(predicate::str::contains(
            "Attachment: resume.pdf <https://files.example/out/resume.pdf>",
        ))
        .stderr(predicate::str::contains("… Reading your experience"))
        .stderr(predicate::str::contains("… Drafting bullet points"));
}

#[tokio::test]
async fn test_send_fails_on_http_error() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_string("agent crashed"))
        .mount(&server)
        .await;

    cargo_bin_cmd!("cvchat")
        .env("CVCHAT_HOME", home.path())
        .env("CVCHAT_BASE_URL", server.uri())
        .args(["send", "--prompt", "hello"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("HTTP 500"));
}

#[tokio::test]
async fn test_send_fails_on_error_event() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ndjson_response(
            "{\"event\":\"thinking\",\"data\":\"Looking\"}\n\
             {\"event\":\"error\",\"message\":\"quota exceeded\"}\n",
        ))
        .mount(&server)
        .await;

    cargo_bin_cmd!("cvchat")
        .env("CVCHAT_HOME", home.path())
        .env("CVCHAT_BASE_URL", server.uri())
        .args(["send", "--prompt", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Service error: quota exceeded"));
}

#[tokio::test]
async fn test_send_prints_final_reply_that_starts_with_error() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ndjson_response(
            "{\"event\":\"final\",\"response\":\"Error: handling is a key skill; list it under Skills.\"}\n",
        ))
        .mount(&server)
        .await;

    cargo_bin_cmd!("cvchat")
        .env("CVCHAT_HOME", home.path())
        .env("CVCHAT_BASE_URL", server.uri())
        .args(["send", "--prompt", "What should I highlight?"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Error: handling is a key skill; list it under Skills.",
        ))
        .stderr(predicate::str::contains("Service error").not());
}

#[tokio::test]
async fn test_send_fails_when_stream_has_no_final() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ndjson_response(
            "{\"event\":\"thinking\",\"data\":\"Looking\"}\n{\"event\":\"final\",\"resp",
        ))
        .mount(&server)
        .await;

    cargo_bin_cmd!("cvchat")
        .env("CVCHAT_HOME", home.path())
        .env("CVCHAT_BASE_URL", server.uri())
        .args(["send", "--prompt", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("without a final response"));
}

#[tokio::test]
async fn test_piped_stdin_sends_prompt() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({
            "messages": [{ "role": "user", "content": "Find me jobs" }]
        })))
        .respond_with(ndjson_response("{\"event\":\"final\",\"response\":\"3 matches\"}\n"))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("cvchat")
        .env("CVCHAT_HOME", home.path())
        .env("CVCHAT_BASE_URL", server.uri())
        .write_stdin("Find me jobs\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 matches"));
}

#[test]
fn test_send_rejects_non_http_attachment() {
    let home = temp_home();

    cargo_bin_cmd!("cvchat")
        .env("CVCHAT_HOME", home.path())
        .env("CVCHAT_BASE_URL", "http://127.0.0.1:9")
        .args(["send", "--prompt", "hi", "--attach", "ftp://files.example/cv.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be http or https"));
}
