use reqwest::Method;
use shared::api::ClientTransport;
use thiserror::Error;

use crate::APP_USER_AGENT;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("unsupported method `{0}`")]
    UnknownMethod(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Talks to an Echoverse server over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(APP_USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }
}

#[async_trait::async_trait(?Send)]
impl ClientTransport for HttpTransport {
    type Error = TransportError;

    async fn send_request(
        &self,
        method: &str,
        route: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Result<serde_json::Value, serde_json::Value>, TransportError> {
        let method = match method.to_lowercase().as_str() {
            "get" => Method::GET,
            "post" => Method::POST,
            "put" => Method::PUT,
            "delete" => Method::DELETE,
            other => return Err(TransportError::UnknownMethod(other.to_owned())),
        };

        let url = format!("{}{}", self.base_url, route);
        let req = self.client.request(method, url);
        let req = if let Some(body) = body {
            req.json(&body)
        } else {
            req
        };

        let resp = req.send().await?;
        let status = resp.status();

        // Error bodies are not always JSON.
        let bytes = resp.bytes().await?;
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

        if status.is_success() {
            Ok(Ok(json))
        } else {
            tracing::debug!(%status, route, "server returned an error status");
            Ok(Err(json))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use shared::{
        notify::RecordingNotifier,
        routes,
        tools::{ChatController, ChatTool},
    };
    use wiremock::{
        matchers::{body_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;

    #[tokio::test]
    async fn chat_round_trip_through_a_server() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(routes::CHAT))
            .and(body_json(json!({ "message": "Hello" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "Hi there" })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::new(mock_server.uri()).unwrap();
        let notifier = RecordingNotifier::new();
        let mut chat = ChatController::new(ChatTool::new());

        chat.submit("Hello", &transport, &notifier).await;

        let contents: Vec<_> = chat
            .tool()
            .transcript()
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, ["Hello", "Hi there"]);
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn non_json_error_body_becomes_null() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::new(mock_server.uri()).unwrap();
        let resp = transport
            .send_request("post", routes::CHAT, Some(json!({ "message": "x" })))
            .await
            .unwrap();

        assert_eq!(resp, Err(serde_json::Value::Null));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        // Nothing listens on port 9 (discard) in the test environment.
        let transport = HttpTransport::new("http://127.0.0.1:9").unwrap();
        let notifier = RecordingNotifier::new();
        let mut chat = ChatController::new(ChatTool::new());

        chat.submit("Hello", &transport, &notifier).await;

        assert_eq!(chat.tool().transcript().len(), 1);
        assert_eq!(notifier.destructive_count(), 1);
    }

    #[tokio::test]
    async fn unknown_methods_are_refused() {
        let transport = HttpTransport::new("http://127.0.0.1:9").unwrap();

        let err = transport.send_request("patch", "/", None).await.unwrap_err();

        assert!(matches!(err, TransportError::UnknownMethod(m) if m == "patch"));
    }
}
