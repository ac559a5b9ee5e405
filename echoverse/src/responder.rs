use miette::Diagnostic;
use shared::{ChatRequest, EducationalRequest, GenerateRequest, MarketingRequest, WebsiteRequest};
use thiserror::Error;

use crate::{openai::Client, prompts, OpenAiError};

#[derive(Error, Diagnostic, Debug)]
pub enum ResponderError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Upstream(#[from] OpenAiError),
}

/// Turns validated tool requests into model output.
#[async_trait::async_trait]
pub trait Generate: Send + Sync {
    async fn chat(&self, req: &ChatRequest) -> Result<String, ResponderError>;

    async fn generate(&self, req: &GenerateRequest) -> Result<String, ResponderError>;

    async fn educational(&self, req: &EducationalRequest) -> Result<String, ResponderError>;

    async fn marketing(&self, req: &MarketingRequest) -> Result<String, ResponderError>;

    async fn website(&self, req: &WebsiteRequest) -> Result<String, ResponderError>;
}

pub struct Responder {
    client: Client,
}

impl Responder {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn run(
        &self,
        tool: &'static str,
        (system, prompt): (String, String),
    ) -> Result<String, ResponderError> {
        tracing::debug!(tool, model = self.client.model(), "requesting completion");

        Ok(self.client.complete(&system, &prompt).await?)
    }
}

#[async_trait::async_trait]
impl Generate for Responder {
    async fn chat(&self, req: &ChatRequest) -> Result<String, ResponderError> {
        self.run("chat", (prompts::CHAT_SYSTEM.to_owned(), req.message.trim().to_owned()))
            .await
    }

    async fn generate(&self, req: &GenerateRequest) -> Result<String, ResponderError> {
        self.run("generate", prompts::content(req)).await
    }

    async fn educational(&self, req: &EducationalRequest) -> Result<String, ResponderError> {
        self.run("educational", prompts::educational(req)).await
    }

    async fn marketing(&self, req: &MarketingRequest) -> Result<String, ResponderError> {
        self.run("marketing", prompts::marketing(req)).await
    }

    async fn website(&self, req: &WebsiteRequest) -> Result<String, ResponderError> {
        let html = self.run("website", prompts::website(req)).await?;

        Ok(prompts::strip_code_fence(&html).to_owned())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use shared::MarketingType;
    use wiremock::{
        matchers::{body_string_contains, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;
    use crate::Config;

    async fn responder_replying(content: &str) -> (MockServer, Responder) {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-1",
                "object": "chat.completion",
                "created": 0,
                "model": "gpt-3.5-turbo",
                "choices": [{
                    "index": 0,
                    "message": { "role": "assistant", "content": content },
                    "finish_reason": "stop"
                }]
            })))
            .mount(&mock_server)
            .await;

        let client = Config::new("test-key")
            .with_base_url(mock_server.uri())
            .client()
            .unwrap();

        (mock_server, Responder::new(client))
    }

    #[tokio::test]
    async fn website_output_is_unfenced() {
        let (_server, responder) = responder_replying("```html\n<!DOCTYPE html><html></html>\n```").await;

        let html = responder
            .website(&WebsiteRequest {
                prompt: "bakery".to_owned(),
            })
            .await
            .unwrap();

        assert_eq!(html, "<!DOCTYPE html><html></html>");
    }

    #[tokio::test]
    async fn marketing_sends_type_specific_instruction() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_string_contains("memorable slogans"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-2",
                "object": "chat.completion",
                "created": 0,
                "model": "gpt-3.5-turbo",
                "choices": [{ "index": 0, "message": { "role": "assistant", "content": "Rise and shine" } }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = Config::new("test-key")
            .with_base_url(mock_server.uri())
            .client()
            .unwrap();
        let responder = Responder::new(client);

        let out = responder
            .marketing(&MarketingRequest {
                prompt: "bakery".to_owned(),
                kind: MarketingType::Slogan,
            })
            .await
            .unwrap();

        assert_eq!(out, "Rise and shine");
    }

    #[tokio::test]
    async fn upstream_failure_surfaces() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = Config::new("test-key")
            .with_base_url(mock_server.uri())
            .client()
            .unwrap();

        let err = Responder::new(client)
            .chat(&ChatRequest {
                message: "hi".to_owned(),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ResponderError::Upstream(OpenAiError::Status { .. })
        ));
    }
}
