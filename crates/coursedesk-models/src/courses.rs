//! Course catalog models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use coursedesk_core::serde::deserialize_lenient_i32;

use crate::ids::CourseId;
use crate::validation::{Normalize, trim_in_place};

/// A course in the catalog.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Course {
    pub course_id: CourseId,
    pub course_name: String,
    pub course_code: String,
    /// Length of the course in months.
    pub course_duration: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The short form of a course used alongside rosters.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CourseSummary {
    pub course_id: CourseId,
    pub course_name: String,
    pub course_code: String,
}

impl From<&Course> for CourseSummary {
    fn from(course: &Course) -> Self {
        Self {
            course_id: course.course_id,
            course_name: course.course_name.clone(),
            course_code: course.course_code.clone(),
        }
    }
}

/// Payload for creating or replacing a course.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CourseDto {
    #[validate(length(
        min = 3,
        max = 255,
        message = "Course name must be between 3 and 255 characters"
    ))]
    #[schema(example = "Algorithms")]
    pub course_name: String,
    #[validate(
        length(
            min = 2,
            max = 50,
            message = "Course code must be between 2 and 50 characters"
        ),
        custom(function = "validate_course_code")
    )]
    #[schema(example = "CS201")]
    pub course_code: String,
    #[validate(range(
        min = 1,
        max = 120,
        message = "Course duration must be between 1 and 120 months"
    ))]
    #[serde(deserialize_with = "deserialize_lenient_i32")]
    #[schema(value_type = i32, example = 4)]
    pub course_duration: i32,
}

impl Normalize for CourseDto {
    fn normalize(&mut self) {
        trim_in_place(&mut self.course_name);
        trim_in_place(&mut self.course_code);
    }
}

fn validate_course_code(code: &str) -> Result<(), ValidationError> {
    if code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        Ok(())
    } else {
        Err(ValidationError::new("course_code").with_message(
            "Course code can only contain letters, numbers, hyphens and underscores".into(),
        ))
    }
}
