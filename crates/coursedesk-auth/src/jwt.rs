//! JWT utilities for authentication.
//!
//! Tokens are HS256 signed with the configured secret and carry
//! `{sub, role, iat, exp}`. Expiry is checked here rather than by
//! `jsonwebtoken` so that the boundary is exact: a token is valid strictly
//! before `exp` and rejected from `exp` onwards, with no leeway.
//!
//! Failures are reported as two distinct signals, [`TokenError::Invalid`] and
//! [`TokenError::Expired`].

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use coursedesk_config::JwtConfig;
use coursedesk_core::AppError;

use crate::claims::Claims;
use crate::role::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Malformed token, bad signature, or unexpected claims.
    #[error("Invalid token.")]
    Invalid,
    #[error("Token expired.")]
    Expired,
}

/// Creates an access token for `user_id`, valid for the configured expiry.
pub fn create_access_token(
    user_id: i64,
    role: Role,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    create_access_token_at(user_id, role, jwt_config, Utc::now().timestamp())
}

/// Same as [`create_access_token`] with an explicit issue time.
pub fn create_access_token_at(
    user_id: i64,
    role: Role,
    jwt_config: &JwtConfig,
    issued_at: i64,
) -> Result<String, AppError> {
    let exp = issued_at
        .checked_add(jwt_config.expiry_seconds)
        .ok_or_else(|| {
            AppError::internal_error("Token expiry overflows the timestamp range".to_string())
        })?;
    let claims = Claims {
        sub: user_id.to_string(),
        role,
        exp,
        iat: issued_at,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies an access token and returns the embedded claims.
///
/// # Errors
///
/// Returns an unauthorized error with message `Invalid token.` or
/// `Token expired.`.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    verify_token_at(token, jwt_config, Utc::now().timestamp())
        .map_err(|e| AppError::unauthorized(e.to_string()))
}

/// Verifies a token as of `now` (Unix seconds).
pub fn verify_token_at(token: &str, jwt_config: &JwtConfig, now: i64) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.leeway = 0;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| TokenError::Invalid)?;

    if now >= claims.exp {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str, expiry_seconds: i64) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            expiry_seconds,
        }
    }

    const ISSUED_AT: i64 = 1_700_000_000;

    #[test]
    fn test_round_trip_carries_subject_and_role() {
        let cfg = config("test-secret", 3600);
        let token = create_access_token_at(42, Role::Student, &cfg, ISSUED_AT).unwrap();
        let claims = verify_token_at(&token, &cfg, ISSUED_AT + 1).unwrap();

        assert_eq!(claims.user_id(), Some(42));
        assert_eq!(claims.role, Role::Student);
        assert_eq!(claims.iat, ISSUED_AT);
        assert_eq!(claims.exp, ISSUED_AT + 3600);
    }

    #[test]
    fn test_overflowing_expiry_is_an_error() {
        let cfg = config("test-secret", i64::MAX);
        let err = create_access_token_at(1, Role::Admin, &cfg, ISSUED_AT).unwrap_err();
        assert_eq!(err.status.as_u16(), 500);
    }

    #[test]
    fn test_expiry_boundary() {
        let cfg = config("test-secret", 3600);
        let token = create_access_token_at(1, Role::Admin, &cfg, ISSUED_AT).unwrap();

        assert!(verify_token_at(&token, &cfg, ISSUED_AT + 3600 - 1).is_ok());
        assert_eq!(
            verify_token_at(&token, &cfg, ISSUED_AT + 3600),
            Err(TokenError::Expired)
        );
        assert_eq!(
            verify_token_at(&token, &cfg, ISSUED_AT + 3600 + 1),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = create_access_token_at(1, Role::Admin, &config("one", 60), ISSUED_AT).unwrap();
        assert_eq!(
            verify_token_at(&token, &config("two", 60), ISSUED_AT),
            Err(TokenError::Invalid)
        );
    }

    #[test]
    fn test_garbage_is_invalid() {
        let cfg = config("test-secret", 60);
        assert_eq!(
            verify_token_at("not.a.jwt", &cfg, ISSUED_AT),
            Err(TokenError::Invalid)
        );
        assert_eq!(verify_token_at("", &cfg, ISSUED_AT), Err(TokenError::Invalid));
    }

    #[test]
    fn test_expired_token_maps_to_unauthorized() {
        let cfg = config("test-secret", 1);
        let token = create_access_token_at(1, Role::Admin, &cfg, ISSUED_AT).unwrap();
        let err = verify_token(&token, &cfg).unwrap_err();

        assert_eq!(err.status.as_u16(), 401);
        assert_eq!(err.error.to_string(), "Token expired.");
    }

    #[test]
    fn test_fresh_token_verifies_now() {
        let cfg = config("test-secret", 60);
        let token = create_access_token(5, Role::Student, &cfg).unwrap();
        assert_eq!(verify_token(&token, &cfg).unwrap().user_id(), Some(5));
    }
}
