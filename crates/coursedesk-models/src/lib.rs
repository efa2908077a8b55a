//! # Coursedesk Models
//!
//! Domain models and DTOs for the Coursedesk API.
//!
//! # Modules
//!
//! - [`ids`]: Strongly-typed ids for users, students and courses
//! - [`courses`]: Course catalog entities and DTOs
//! - [`students`]: Student entities, the course-joined view and DTOs
//! - [`users`]: Login accounts
//! - [`auth`]: Login and registration payloads
//! - [`validation`]: Input normalization applied before validation
//!
//! # Example
//!
//! ```ignore
//! use coursedesk_models::courses::CourseDto;
//! use validator::Validate;
//!
//! let dto: CourseDto = serde_json::from_str(body)?;
//! dto.validate()?;
//! ```

pub mod auth;
pub mod courses;
pub mod ids;
pub mod students;
pub mod users;
pub mod validation;

pub use auth::{AuthResponse, LoginRequest, RegisterRequest};
pub use courses::{Course, CourseDto, CourseSummary};
pub use ids::{CourseId, StudentId, UserId};
pub use students::{CourseRoster, CreateStudentDto, Student, StudentDetails, UpdateStudentDto};
pub use users::{User, UserInfo};
pub use validation::Normalize;
