use crate::domain::AccountKind;
use crate::error::RegistrationError;
use crate::transport::http::types::{
    error_response, internal_error, json_422, AppState, ErrorResponse, RegisterRequest,
    RegisterResponse,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

const EXPECTED_BODY: &str = "{\"email\": \"...\", \"password\": \"...\"}";

#[utoipa::path(
    post,
    path = "/patient/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "`done` if created, `exist` if the email is already registered", body = RegisterResponse),
        (status = 400, description = "Blank email or password", body = ErrorResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn register_patient_handler(
    State(state): State<AppState>,
    request: Result<Json<RegisterRequest>, JsonRejection>,
) -> Response {
    register(&state, AccountKind::Patient, request).await
}

#[utoipa::path(
    post,
    path = "/doctor/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "`done` if created, `exist` if the email is already registered", body = RegisterResponse),
        (status = 400, description = "Blank email or password", body = ErrorResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn register_doctor_handler(
    State(state): State<AppState>,
    request: Result<Json<RegisterRequest>, JsonRejection>,
) -> Response {
    register(&state, AccountKind::Doctor, request).await
}

async fn register(
    state: &AppState,
    kind: AccountKind,
    request: Result<Json<RegisterRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, EXPECTED_BODY).into_response(),
    };

    match state
        .registrar
        .register(kind, &request.email, &request.password)
        .await
    {
        Ok(result) => (
            StatusCode::OK,
            Json(RegisterResponse {
                status: result.status().to_string(),
            }),
        )
            .into_response(),
        Err(RegistrationError::Validation(msg)) => {
            error_response(StatusCode::BAD_REQUEST, msg).into_response()
        }
        Err(e) => {
            tracing::error!(%kind, error = %e, "registration failed");
            internal_error().into_response()
        }
    }
}
