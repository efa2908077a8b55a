use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use coursedesk_core::{ApiResponse, AppError, ErrorBody};

use crate::modules::auth::model::{AuthResponse, LoginRequest, RegisterRequest};
use crate::modules::auth::service::AuthService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Register as a student and receive a token
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registration successful", body = ApiResponse<AuthResponse>),
        (status = 400, description = "Validation error, unknown course, or email/username taken", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponse>>), AppError> {
    let response =
        AuthService::register(&state.db, dto, &state.jwt_config, &state.password_config).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Registration successful", response)),
    ))
}

/// Login and receive a token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful; students also get their profile", body = ApiResponse<AuthResponse>),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "Invalid username or password", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    let response =
        AuthService::login(&state.db, dto, &state.jwt_config, &state.password_config).await?;
    Ok(Json(ApiResponse::ok("Login successful", response)))
}
