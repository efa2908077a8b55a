//! Uniform response envelope.
//!
//! Successful responses are `{success: true, message, data?, count?}`; errors
//! are `{success: false, message, detail?}`.

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            count: None,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// A list payload; `count` mirrors the number of items.
    pub fn list(message: impl Into<String>, items: Vec<T>) -> Self {
        let count = items.len();
        Self::ok(message, items).with_count(count)
    }
}

impl ApiResponse<()> {
    /// A response carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            count: None,
        }
    }
}

/// Schema of a success response without a payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageBody {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    /// Full error chain, present outside production only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}
