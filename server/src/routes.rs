use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{Method, StatusCode},
    routing::{get, post},
    Json, Router,
};
use echoverse::Generate;
use serde::de::DeserializeOwned;
use shared::{
    routes,
    validation::{check, LoginRequest, RegisterRequest, Validate},
    ChatRequest, ChatResponse, ContentResponse, EducationalRequest, GenerateRequest,
    MarketingRequest, MessageResponse, WebsiteRequest,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn Generate>,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        // allow `GET` and `POST` when accessing the resource
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
        // allow requests from any origin
        .allow_origin(Any);

    Router::new()
        .route(routes::HEALTH, get(|| async { "ok" }))
        .route(routes::CHAT, post(chat))
        .route(routes::GENERATE, post(generate))
        .route(routes::GENERATE_EDUCATIONAL, post(generate_educational))
        .route(routes::GENERATE_MARKETING, post(generate_marketing))
        .route(routes::GENERATE_WEBSITE, post(generate_website))
        .route(routes::REGISTER, post(register))
        .route(routes::LOGIN, post(login))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Unwraps the JSON body and runs its schema.
fn validated<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError>
where
    T: DeserializeOwned + Validate,
{
    let Json(body) = body?;
    check(&body)?;
    Ok(body)
}

async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let req = validated(body)?;
    let response = state.generator.chat(&req).await?;

    Ok(Json(ChatResponse { response }))
}

async fn generate(
    State(state): State<AppState>,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<ContentResponse>, ApiError> {
    let req = validated(body)?;
    let content = state.generator.generate(&req).await?;

    Ok(Json(ContentResponse { content }))
}

async fn generate_educational(
    State(state): State<AppState>,
    body: Result<Json<EducationalRequest>, JsonRejection>,
) -> Result<Json<ContentResponse>, ApiError> {
    let req = validated(body)?;
    let content = state.generator.educational(&req).await?;

    Ok(Json(ContentResponse { content }))
}

async fn generate_marketing(
    State(state): State<AppState>,
    body: Result<Json<MarketingRequest>, JsonRejection>,
) -> Result<Json<ContentResponse>, ApiError> {
    let req = validated(body)?;
    let content = state.generator.marketing(&req).await?;

    Ok(Json(ContentResponse { content }))
}

async fn generate_website(
    State(state): State<AppState>,
    body: Result<Json<WebsiteRequest>, JsonRejection>,
) -> Result<Json<ContentResponse>, ApiError> {
    let req = validated(body)?;
    let content = state.generator.website(&req).await?;

    Ok(Json(ContentResponse { content }))
}

// Account routes only validate; users are not stored and no session is issued.
async fn register(
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let req = validated(body)?;
    tracing::info!(email = %req.email.trim(), "registration accepted");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully".to_owned(),
        }),
    ))
}

async fn login(
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let req = validated(body)?;
    tracing::info!(email = %req.email.trim(), "login accepted");

    Ok(Json(MessageResponse {
        message: "Login successful".to_owned(),
    }))
}
