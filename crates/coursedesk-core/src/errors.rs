//! Application error type.
//!
//! Every handler and service returns [`AppError`]. It pairs an HTTP status with
//! an [`anyhow::Error`] and is rendered into the uniform error envelope by its
//! [`IntoResponse`] implementation, which is the only place errors become
//! responses.
//!
//! Whether the cause chain is echoed back to clients is decided once at
//! startup with [`set_error_detail`]; until then errors are rendered without
//! detail.

use std::sync::OnceLock;

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::response::ErrorBody;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// How much of an error is exposed in response bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorDetail {
    /// Only the client-facing message. 5xx messages are replaced by a generic one.
    #[default]
    Hidden,
    /// The client-facing message plus the full cause chain.
    Verbose,
}

static ERROR_DETAIL: OnceLock<ErrorDetail> = OnceLock::new();

/// Sets the process-wide error detail level. Only the first call has an effect.
pub fn set_error_detail(detail: ErrorDetail) {
    let _ = ERROR_DETAIL.set(detail);
}

/// Returns the configured error detail level.
pub fn error_detail() -> ErrorDetail {
    ERROR_DETAIL.get().copied().unwrap_or_default()
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    /// Malformed or rule-breaking input.
    pub fn validation<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    /// Uniqueness or referential-integrity violation.
    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn unauthorized(message: String) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, Error::msg(message))
    }

    pub fn forbidden(message: String) -> Self {
        Self::new(StatusCode::FORBIDDEN, Error::msg(message))
    }

    pub fn internal_error(message: String) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, Error::msg(message))
    }

    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }

    /// The message a client sees for this error at the given detail level.
    pub fn client_message(&self, detail: ErrorDetail) -> String {
        if self.is_server_error() && detail == ErrorDetail::Hidden {
            INTERNAL_MESSAGE.to_string()
        } else {
            self.error.to_string()
        }
    }

    pub fn to_body(&self, detail: ErrorDetail) -> ErrorBody {
        ErrorBody {
            success: false,
            message: self.client_message(detail),
            detail: match detail {
                ErrorDetail::Verbose => Some(format!("{:?}", self.error)),
                ErrorDetail::Hidden => None,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = ?self.error, "Request failed");
        }

        let body = Json(self.to_body(error_detail()));
        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
