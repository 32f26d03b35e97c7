//! HTTP client for the chat service.
//!
//! Two endpoints: the streaming chat endpoint, answered with NDJSON, and the
//! session reset endpoint.

pub mod error;
pub mod ndjson;

use std::time::Duration;

use anyhow::{Context, Result};
use cvchat_types::{ChatEvent, ChatRequest, RawEvent, ResetRequest};
use futures_util::StreamExt;
use futures_util::stream::BoxStream;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Response, StatusCode};

pub use self::error::{ClientError, ClientErrorKind, ClientResult};
pub use self::ndjson::{FrameDecoder, NdjsonStream};

/// User-Agent sent with every request.
pub const USER_AGENT: &str = concat!("cvchat/", env!("CARGO_PKG_VERSION"));

/// Typed events of one streamed reply.
pub type ChatEventStream = BoxStream<'static, ClientResult<ChatEvent>>;

/// Endpoint settings for [`ChatClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub chat_path: String,
    pub reset_path: String,
    /// Connection timeout. Streams themselves are not time-limited.
    pub connect_timeout: Duration,
}

/// Chat service client. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    chat_url: String,
    reset_url: String,
}

impl ChatClient {
    /// Builds a client for the configured endpoints.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            chat_url: join_url(&config.base_url, &config.chat_path),
            reset_url: join_url(&config.base_url, &config.reset_path),
        })
    }

    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }

    pub fn reset_url(&self) -> &str {
        &self.reset_url
    }

    /// Sends a chat request and returns the reply as a stream of events.
    ///
    /// # Errors
    /// Fails on connection errors, non-success statuses and empty bodies.
    pub async fn open_chat_stream(&self, request: &ChatRequest) -> ClientResult<ChatEventStream> {
        tracing::debug!(
            url = %self.chat_url,
            messages = request.messages.len(),
            attachments = request.data.attachments.len(),
            "opening chat stream"
        );

        let response = self
            .http
            .post(&self.chat_url)
            .header("accept", "application/x-ndjson")
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(&e))?;

        let status = response.status();
        // Failure statuses are still streamed when the body is NDJSON, so a
        // server `error` event reaches the conversation.
        if !status.is_success() && !is_ndjson(&response) {
            let error_body = response.text().await.unwrap_or_default();
            return Err(ClientError::http_status(status.as_u16(), &error_body));
        }
        if status == StatusCode::NO_CONTENT || response.content_length() == Some(0) {
            return Err(ClientError::missing_body());
        }
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "streaming NDJSON body of failed request");
        }

        let events = NdjsonStream::new(Box::pin(response.bytes_stream()))
            .map(|item| item.map(RawEvent::into_chat_event));
        Ok(events.boxed())
    }

    /// Asks the service to forget the session for `chat_id`.
    ///
    /// # Errors
    /// Fails on connection errors and non-success statuses.
    pub async fn reset_session(&self, chat_id: &str) -> ClientResult<()> {
        let body = ResetRequest {
            chat_id: chat_id.to_string(),
        };
        let response = self
            .http
            .post(&self.reset_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(&e))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(ClientError::http_status(status.as_u16(), &error_body));
        }
        tracing::info!(chat_id, "session reset");
        Ok(())
    }
}

fn is_ndjson(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("ndjson"))
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use cvchat_types::{Attachment, Message, MessageId};
    use serde_json::json;
    use wiremock::matchers::{body_json, body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> ChatClient {
        ChatClient::new(&ClientConfig {
            base_url: server.uri(),
            chat_path: "/api/chat".to_string(),
            reset_path: "/api/session/reset".to_string(),
            connect_timeout: Duration::from_secs(5),
        })
        .expect("client")
    }

    fn request() -> ChatRequest {
        ChatRequest::new(
            &[Message::user(MessageId::new("1"), "tailor my resume")],
            vec![Attachment::new("https://f/cv.pdf", "cv.pdf", "application/pdf")],
            "001",
        )
    }

    #[test]
    fn join_url_normalizes_slashes() {
        assert_eq!(join_url("http://h:8000/", "/api/chat"), "http://h:8000/api/chat");
        assert_eq!(join_url("http://h:8000", "api/chat"), "http://h:8000/api/chat");
    }

    #[tokio::test]
    async fn streams_events_from_ndjson_body() {
        let server = MockServer::start().await;
        let body = concat!(
            "{\"event\":\"thinking\",\"data\":\"step1\"}\n",
            "{\"event\":\"final\",\"response\":\"done\"}\n",
        );
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(header("user-agent", USER_AGENT))
            .and(body_partial_json(json!({
                "chatId": "001",
                "messages": [{"role": "user", "content": "tailor my resume"}],
                "data": {"attachments": [
                    {"url": "https://f/cv.pdf", "name": "cv.pdf", "contentType": "application/pdf"}
                ]}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/x-ndjson"))
            .expect(1)
            .mount(&server)
            .await;

        let stream = client_for(&server)
            .open_chat_stream(&request())
            .await
            .expect("stream opens");
        let events: Vec<ChatEvent> = stream.map(|e| e.expect("event")).collect().await;

        assert_eq!(
            events,
            vec![
                ChatEvent::Thinking(Some("step1".to_string())),
                ChatEvent::Final {
                    response: "done".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn non_success_status_is_http_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"detail": "agent crashed"})),
            )
            .mount(&server)
            .await;

        let Err(err) = client_for(&server).open_chat_stream(&request()).await else {
            panic!("expected error");
        };
        assert_eq!(err.kind, ClientErrorKind::HttpStatus);
        assert_eq!(err.message, "HTTP 500: agent crashed");
    }

    #[tokio::test]
    async fn failure_status_with_ndjson_body_is_streamed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(500).set_body_raw(
                "{\"event\":\"error\",\"message\":\"agent crashed\"}\n",
                "application/x-ndjson",
            ))
            .mount(&server)
            .await;

        let stream = client_for(&server)
            .open_chat_stream(&request())
            .await
            .expect("stream opens");
        let events: Vec<ChatEvent> = stream.map(|e| e.expect("event")).collect().await;

        assert_eq!(
            events,
            vec![ChatEvent::Error {
                message: "agent crashed".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn no_content_is_missing_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let Err(err) = client_for(&server).open_chat_stream(&request()).await else {
            panic!("expected error");
        };
        assert_eq!(err.kind, ClientErrorKind::MissingBody);
        assert_eq!(err.message, "No response body");
    }

    #[tokio::test]
    async fn unreachable_server_is_connection_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ChatClient::new(&ClientConfig {
            base_url: format!("http://{addr}"),
            chat_path: "/api/chat".to_string(),
            reset_path: "/api/session/reset".to_string(),
            connect_timeout: Duration::from_secs(5),
        })
        .unwrap();

        let Err(err) = client.open_chat_stream(&request()).await else {
            panic!("expected error");
        };
        assert_eq!(err.kind, ClientErrorKind::Connection);
    }

    #[tokio::test]
    async fn reset_posts_chat_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/session/reset"))
            .and(body_json(json!({"chatId": "001"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .reset_session("001")
            .await
            .expect("reset succeeds");
    }

    #[tokio::test]
    async fn reset_failure_reports_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/session/reset"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client_for(&server).reset_session("001").await.unwrap_err();
        assert_eq!(err.kind, ClientErrorKind::HttpStatus);
        assert_eq!(err.message, "HTTP 404");
    }
}
