//! # Coursedesk Core
//!
//! Core types, errors, and utilities for the Coursedesk API.
//!
//! - [`errors`]: Application error type and the single translation point into
//!   the HTTP response envelope
//! - [`response`]: The `{success, message, data?, count?}` response envelope
//! - [`password`]: bcrypt password hashing and verification
//! - [`serde`]: Lenient deserialization helpers for request payloads
//!
//! # Example
//!
//! ```ignore
//! use coursedesk_core::errors::AppError;
//! use coursedesk_core::password::{hash_password, verify_password};
//! use coursedesk_core::response::ApiResponse;
//!
//! let error = AppError::not_found(anyhow::anyhow!("Course not found"));
//! let hash = hash_password("secure_password", 10)?;
//! let body = ApiResponse::ok("Course retrieved successfully", course);
//! ```

pub mod errors;
pub mod password;
pub mod response;
pub mod serde;

pub use errors::{AppError, ErrorDetail};
pub use response::{ApiResponse, ErrorBody, MessageBody};
