use serde::{Deserialize, Serialize};

use super::{Client, OpenAiError};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub content: String,
    pub role: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            role: "system".to_string(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            role: "user".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CompletionRequest {
    messages: Vec<Message>,
    model: String,
}

impl CompletionRequest {
    /// A system instruction followed by one user turn.
    pub fn new(model: &str, system: &str, prompt: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![Message::system(system), Message::user(prompt)],
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CompletionChoice {
    #[serde(default)]
    finish_reason: Option<String>,
    index: i64,
    pub message: Message,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CompletionUsage {
    completion_tokens: i64,
    prompt_tokens: i64,
    pub total_tokens: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CompletionResponse {
    pub choices: Vec<CompletionChoice>,
    pub created: i64,
    pub id: String,
    pub model: String,
    pub object: String,
    #[serde(default)]
    pub usage: CompletionUsage,
}

impl CompletionResponse {
    pub fn first_content(&self) -> Result<&str, OpenAiError> {
        self.choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or(OpenAiError::NoChoices)
    }
}

impl Client {
    pub async fn completion(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, OpenAiError> {
        let started = std::time::Instant::now();

        let response = self
            .http
            .post(self.url("/chat/completions"))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OpenAiError::Status { status, body });
        }

        let response_body: CompletionResponse = response.json().await?;

        tracing::debug!(
            model = %response_body.model,
            total_tokens = response_body.usage.total_tokens,
            elapsed = ?started.elapsed(),
            "completion finished"
        );

        Ok(response_body)
    }

    /// Sends `prompt` under `system` with the configured model and returns the first choice.
    pub async fn complete(&self, system: &str, prompt: &str) -> Result<String, OpenAiError> {
        let request = CompletionRequest::new(&self.model, system, prompt);
        let resp = self.completion(request).await?;

        Ok(resp.first_content()?.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        matchers::{body_partial_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;
    use crate::openai::Config;

    fn completion_body(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "created": 1_677_652_288,
            "model": "gpt-3.5-turbo",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 9, "completion_tokens": 12, "total_tokens": 21 }
        })
    }

    #[tokio::test]
    async fn complete_returns_first_choice() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": "gpt-3.5-turbo",
                "messages": [
                    { "role": "system", "content": "be brief" },
                    { "role": "user", "content": "hello" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("hi")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = Config::new("test-key")
            .with_base_url(mock_server.uri())
            .client()
            .unwrap();

        assert_eq!(client.complete("be brief", "hello").await.unwrap(), "hi");
    }

    #[tokio::test]
    async fn error_status_is_reported_with_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&mock_server)
            .await;

        let client = Config::new("test-key")
            .with_base_url(mock_server.uri())
            .client()
            .unwrap();

        match client.complete("system", "hello").await.unwrap_err() {
            OpenAiError::Status { status, body } => {
                assert_eq!(status.as_u16(), 429);
                assert_eq!(body, "rate limited");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_choices_is_an_error() {
        let mock_server = MockServer::start().await;

        let mut body = completion_body("unused");
        body["choices"] = json!([]);
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&mock_server)
            .await;

        let client = Config::new("test-key")
            .with_base_url(mock_server.uri())
            .client()
            .unwrap();

        assert!(matches!(
            client.complete("system", "hello").await,
            Err(OpenAiError::NoChoices)
        ));
    }
}
