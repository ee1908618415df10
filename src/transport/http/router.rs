use crate::domain::AccountKind;
use crate::transport::http::handlers::{health, register};
use crate::transport::http::types::{
    AppState, ErrorResponse, HealthResponse, RegisterRequest, RegisterResponse,
};
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        register::register_patient_handler,
        register::register_doctor_handler
    ),
    components(schemas(
        RegisterRequest,
        RegisterResponse,
        ErrorResponse,
        HealthResponse,
        AccountKind
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/patient/register", post(register::register_patient_handler))
        .route("/doctor/register", post(register::register_doctor_handler))
        .with_state(app_state)
}

/// CORS policy allowing a single browser origin (the web frontend).
pub fn cors_layer(origin: &str) -> anyhow::Result<CorsLayer> {
    let origin = HeaderValue::from_str(origin)
        .map_err(|e| anyhow::anyhow!("invalid CORS_ORIGIN '{}': {}", origin, e))?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]))
}
