//! Student models and DTOs.
//!
//! [`Student`] is the bare table row. Everything served over the API uses
//! [`StudentDetails`], the student joined with the course it is enrolled in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use coursedesk_core::serde::deserialize_lenient_i64;

use crate::courses::CourseSummary;
use crate::ids::{CourseId, StudentId};
use crate::validation::{Normalize, normalize_email, trim_in_place};

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Student {
    pub student_id: StudentId,
    pub name: String,
    pub email: String,
    pub course_id: CourseId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A student with the name, code and duration of their course.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct StudentDetails {
    pub student_id: StudentId,
    pub name: String,
    pub email: String,
    pub course_id: CourseId,
    pub course_name: String,
    pub course_code: String,
    pub course_duration: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Students enrolled in one course.
#[derive(Debug, Serialize, ToSchema)]
pub struct CourseRoster {
    pub course: CourseSummary,
    pub students: Vec<StudentDetails>,
}

/// DTO for creating a student.
///
/// When both `username` and `password` are given a STUDENT login is created
/// for the new record in the same transaction.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[validate(schema(function = "validate_credentials_pair"))]
pub struct CreateStudentDto {
    #[validate(length(min = 2, max = 255, message = "Name must be between 2 and 255 characters"))]
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[validate(email(message = "Please provide a valid email"))]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[serde(deserialize_with = "deserialize_lenient_i64")]
    #[validate(range(min = 1, message = "Course ID must be a valid positive integer"))]
    #[schema(value_type = i64, example = 1)]
    pub course_id: i64,
    #[serde(default)]
    #[validate(length(min = 3, max = 100, message = "Username must be between 3 and 100 characters"))]
    pub username: Option<String>,
    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
}

impl CreateStudentDto {
    /// The login to create alongside the student, if any.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some((username.as_str(), password.as_str())),
            _ => None,
        }
    }
}

fn validate_credentials_pair(dto: &CreateStudentDto) -> Result<(), ValidationError> {
    if dto.username.is_some() != dto.password.is_some() {
        return Err(ValidationError::new("credentials")
            .with_message("Username and password must be provided together".into()));
    }
    Ok(())
}

impl Normalize for CreateStudentDto {
    fn normalize(&mut self) {
        trim_in_place(&mut self.name);
        normalize_email(&mut self.email);
        if let Some(username) = self.username.as_mut() {
            trim_in_place(username);
        }
        // Blank optional fields count as absent.
        self.username = self.username.take().filter(|u| !u.is_empty());
        self.password = self.password.take().filter(|p| !p.is_empty());
    }
}

/// DTO for updating a student. All fields are required.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateStudentDto {
    #[validate(length(min = 2, max = 255, message = "Name must be between 2 and 255 characters"))]
    pub name: String,
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,
    #[serde(deserialize_with = "deserialize_lenient_i64")]
    #[validate(range(min = 1, message = "Course ID must be a valid positive integer"))]
    #[schema(value_type = i64, example = 1)]
    pub course_id: i64,
}

impl Normalize for UpdateStudentDto {
    fn normalize(&mut self) {
        trim_in_place(&mut self.name);
        normalize_email(&mut self.email);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(json: &str) -> CreateStudentDto {
        let mut dto: CreateStudentDto = serde_json::from_str(json).unwrap();
        dto.normalize();
        dto
    }

    #[test]
    fn test_create_without_credentials() {
        let dto = create(r#"{"name":"Ada","email":" ADA@Example.com ","course_id":"2"}"#);
        assert!(dto.validate().is_ok());
        assert_eq!(dto.email, "ada@example.com");
        assert_eq!(dto.course_id, 2);
        assert!(dto.credentials().is_none());
    }

    #[test]
    fn test_create_with_credentials() {
        let dto = create(
            r#"{"name":"Ada","email":"ada@example.com","course_id":1,"username":"ada","password":"secret1"}"#,
        );
        assert!(dto.validate().is_ok());
        assert_eq!(dto.credentials(), Some(("ada", "secret1")));
    }

    #[test]
    fn test_credentials_must_come_in_pairs() {
        let dto = create(r#"{"name":"Ada","email":"ada@example.com","course_id":1,"username":"ada"}"#);
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("__all__"));
    }

    #[test]
    fn test_blank_credentials_are_absent() {
        let dto = create(
            r#"{"name":"Ada","email":"ada@example.com","course_id":1,"username":"  ","password":""}"#,
        );
        assert!(dto.validate().is_ok());
        assert!(dto.credentials().is_none());
    }

    #[test]
    fn test_update_rejects_bad_email_and_course() {
        let mut dto: UpdateStudentDto =
            serde_json::from_str(r#"{"name":"Ada","email":"nope","course_id":0}"#).unwrap();
        dto.normalize();
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("course_id"));
    }
}
