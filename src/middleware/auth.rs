use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use coursedesk_auth::{Role, verify_token};
use coursedesk_core::AppError;
use coursedesk_models::{StudentId, UserId};

use crate::modules::users::service::UserService;
use crate::state::AppState;

pub const NO_TOKEN: &str = "Access denied. No token provided.";
pub const USER_NOT_FOUND: &str = "Invalid token. User not found.";

/// The verified caller.
///
/// Built from a valid bearer token, then refreshed from the database so a
/// deleted user is rejected even while their token is still unexpired. Once
/// extracted it is cached in the request extensions.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
    pub student_id: Option<StudentId>,
}

/// The token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let token =
            bearer_token(parts).ok_or_else(|| AppError::unauthorized(NO_TOKEN.to_string()))?;

        let claims = verify_token(token, &state.jwt_config)?;
        let user_id = claims
            .user_id()
            .map(UserId::from)
            .ok_or_else(|| AppError::unauthorized("Invalid token.".to_string()))?;

        let user = UserService::find_by_id(&state.db, user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized(USER_NOT_FOUND.to_string()))?;

        let auth_user = AuthUser {
            user_id: user.user_id,
            username: user.username,
            role: user.role,
            student_id: user.student_id,
        };
        parts.extensions.insert(auth_user.clone());

        Ok(auth_user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(header_value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/students/me");
        if let Some(value) = header_value {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(&parts_with(Some("Bearer abc.def"))), Some("abc.def"));
        assert_eq!(bearer_token(&parts_with(Some("Bearer   "))), None);
        assert_eq!(bearer_token(&parts_with(Some("Basic abc"))), None);
        assert_eq!(bearer_token(&parts_with(None)), None);
    }
}
