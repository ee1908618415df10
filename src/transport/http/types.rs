use crate::app::Registrar;
use crate::storage::AccountStore;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub registrar: Registrar,
    pub store: Arc<dyn AccountStore>,
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    /// Plaintext; hashed before it is stored.
    pub password: String,
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct RegisterResponse {
    /// `done` when a new account was created, `exist` when the email is taken.
    pub status: String,
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Body returned for every infrastructure failure. Details stay in the logs.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error.";

pub fn error_response(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            message: message.into(),
        }),
    )
}

pub fn internal_error() -> (StatusCode, Json<ErrorResponse>) {
    error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
}

pub fn json_422(err: JsonRejection, expected: &str) -> (StatusCode, Json<ErrorResponse>) {
    error_response(
        StatusCode::UNPROCESSABLE_ENTITY,
        format!("Invalid JSON body: {} (expected: {})", err.body_text(), expected),
    )
}
