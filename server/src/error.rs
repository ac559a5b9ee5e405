use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use echoverse::ResponderError;
use shared::{validation::ValidationErrors, ErrorResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("malformed request body: {0}")]
    Body(#[from] JsonRejection),
    #[error("model request failed")]
    Upstream(#[from] ResponderError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                tracing::info!(fields = errors.errors.len(), "rejected invalid payload");
                (StatusCode::BAD_REQUEST, Json(errors)).into_response()
            }
            ApiError::Body(rejection) => {
                tracing::info!(%rejection, "rejected malformed body");
                let errors = ValidationErrors::single("body", rejection.body_text());
                (StatusCode::BAD_REQUEST, Json(errors)).into_response()
            }
            ApiError::Upstream(err) => {
                tracing::error!(error = %err, "model request failed");
                let body = ErrorResponse {
                    error: "Failed to generate a response".to_owned(),
                };
                (StatusCode::BAD_GATEWAY, Json(body)).into_response()
            }
        }
    }
}
