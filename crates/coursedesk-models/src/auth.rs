//! Login and registration payloads.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use coursedesk_core::serde::deserialize_lenient_i64;

use crate::students::StudentDetails;
use crate::users::UserInfo;
use crate::validation::{Normalize, normalize_email, trim_in_place};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "ada")]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "password123")]
    pub password: String,
}

impl Normalize for LoginRequest {
    fn normalize(&mut self) {
        trim_in_place(&mut self.username);
    }
}

/// Self-registration as a student.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[validate(email(message = "Please provide a valid email"))]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[validate(length(min = 3, max = 100, message = "Username must be at least 3 characters"))]
    #[schema(example = "ada")]
    pub username: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "password123")]
    pub password: String,
    #[serde(deserialize_with = "deserialize_lenient_i64")]
    #[validate(range(min = 1, message = "Valid course ID is required"))]
    #[schema(value_type = i64, example = 1)]
    pub course_id: i64,
}

impl Normalize for RegisterRequest {
    fn normalize(&mut self) {
        trim_in_place(&mut self.name);
        normalize_email(&mut self.email);
        trim_in_place(&mut self.username);
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserInfo,
    /// The caller's profile; present for students on login.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<StudentDetails>,
}
