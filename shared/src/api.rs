use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::{
    routes,
    validation::{LoginRequest, RegisterRequest},
    ChatRequest, ChatResponse, ContentResponse, EducationalRequest, GenerateRequest,
    MarketingRequest, MessageResponse, WebsiteRequest,
};

/// Moves JSON to and from the backend.
///
/// The outer `Result` is the transport itself failing. The inner one
/// separates 2xx bodies (`Ok`) from every other status (`Err`).
#[async_trait::async_trait(?Send)]
pub trait ClientTransport {
    type Error: std::error::Error + 'static;

    async fn send_request(
        &self,
        method: &str,
        route: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Result<serde_json::Value, serde_json::Value>, Self::Error>;
}

#[derive(Error, Debug)]
pub enum ClientError<ApiError, TransportError>
where
    ApiError: Debug,
    TransportError: Debug + std::error::Error,
{
    #[error(transparent)]
    Transport(TransportError),
    #[error(transparent)]
    Deserialization(serde_json::Error),
    #[error(transparent)]
    Serialization(serde_json::Error),
    #[error("Api Error: {0:?}")]
    Api(ApiError),
}

/// Error type every typed call over `T` returns. Non-2xx bodies are kept raw.
pub type CallError<T> = ClientError<serde_json::Value, <T as ClientTransport>::Error>;

pub async fn post_json<T, Req, Resp>(transport: &T, route: &str, body: &Req) -> Result<Resp, CallError<T>>
where
    T: ClientTransport + ?Sized,
    Req: Serialize,
    Resp: DeserializeOwned,
{
    let body = serde_json::to_value(body).map_err(ClientError::Serialization)?;

    let resp = transport
        .send_request("post", route, Some(body))
        .await
        .map_err(ClientError::Transport)?;

    match resp {
        Ok(resp) => serde_json::from_value(resp).map_err(ClientError::Deserialization),
        Err(resp) => Err(ClientError::Api(resp)),
    }
}

#[async_trait::async_trait(?Send)]
pub trait Api {
    type Error;

    async fn chat(&self, body: &ChatRequest) -> Result<ChatResponse, Self::Error>;

    async fn generate(&self, body: &GenerateRequest) -> Result<ContentResponse, Self::Error>;

    async fn generate_educational(
        &self,
        body: &EducationalRequest,
    ) -> Result<ContentResponse, Self::Error>;

    async fn generate_marketing(
        &self,
        body: &MarketingRequest,
    ) -> Result<ContentResponse, Self::Error>;

    async fn generate_website(&self, body: &WebsiteRequest) -> Result<ContentResponse, Self::Error>;

    async fn register(&self, body: &RegisterRequest) -> Result<MessageResponse, Self::Error>;

    async fn login(&self, body: &LoginRequest) -> Result<MessageResponse, Self::Error>;
}

#[async_trait::async_trait(?Send)]
impl<Transport> Api for Transport
where
    Transport: ClientTransport,
{
    type Error = CallError<Transport>;

    async fn chat(&self, body: &ChatRequest) -> Result<ChatResponse, CallError<Transport>> {
        post_json(self, routes::CHAT, body).await
    }

    async fn generate(&self, body: &GenerateRequest) -> Result<ContentResponse, CallError<Transport>> {
        post_json(self, routes::GENERATE, body).await
    }

    async fn generate_educational(
        &self,
        body: &EducationalRequest,
    ) -> Result<ContentResponse, CallError<Transport>> {
        post_json(self, routes::GENERATE_EDUCATIONAL, body).await
    }

    async fn generate_marketing(
        &self,
        body: &MarketingRequest,
    ) -> Result<ContentResponse, CallError<Transport>> {
        post_json(self, routes::GENERATE_MARKETING, body).await
    }

    async fn generate_website(&self, body: &WebsiteRequest) -> Result<ContentResponse, CallError<Transport>> {
        post_json(self, routes::GENERATE_WEBSITE, body).await
    }

    async fn register(&self, body: &RegisterRequest) -> Result<MessageResponse, CallError<Transport>> {
        post_json(self, routes::REGISTER, body).await
    }

    async fn login(&self, body: &LoginRequest) -> Result<MessageResponse, CallError<Transport>> {
        post_json(self, routes::LOGIN, body).await
    }
}
