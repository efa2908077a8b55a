//! Role-based authorization.
//!
//! Every protected route names exactly one role. There is no hierarchy: an
//! admin calling a student-only route is rejected like anyone else.
//!
//! Two forms are provided:
//! 1. Layer-based middleware ([`require_admin`], [`require_student`])
//! 2. Extractor-based ([`RequireAdmin`]) for routers that mix public and
//!    protected methods on the same path

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};

use coursedesk_auth::Role;
use coursedesk_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub const INSUFFICIENT_ROLE: &str = "Access denied. Insufficient permissions.";
pub const STUDENTS_ONLY: &str = "This endpoint is only accessible to students";

/// Authenticates the request and checks the caller holds `required`.
///
/// The resolved [`AuthUser`] is stored in the request extensions, so handlers
/// behind the layer extract it without a second lookup.
pub async fn require_role(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    required: Role,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    check_role(&auth_user, required)?;

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

/// Layer for admin-only routes.
///
/// ```rust,ignore
/// let admin_routes = Router::new()
///     .route("/", get(get_students))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
/// ```
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_role(State(state), req, next, Role::Admin).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Layer for student-only routes.
pub async fn require_student(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_role(State(state), req, next, Role::Student).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Extractor for admin-level access.
///
/// ```rust,ignore
/// pub async fn create_course(
///     _admin: RequireAdmin,
///     State(state): State<AppState>,
/// ) -> Result<Json<ApiResponse<Course>>, AppError> {
///     // Only admins get here
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        check_role(&auth_user, Role::Admin)?;
        Ok(RequireAdmin(auth_user))
    }
}

/// Checks a resolved user against the single role a route requires.
pub fn check_role(auth_user: &AuthUser, required: Role) -> Result<(), AppError> {
    if auth_user.role == required {
        return Ok(());
    }

    let message = match required {
        Role::Student => STUDENTS_ONLY,
        Role::Admin => INSUFFICIENT_ROLE,
    };
    Err(AppError::forbidden(message.to_string()))
}
