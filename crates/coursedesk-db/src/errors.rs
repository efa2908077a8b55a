//! Translation of store errors into [`AppError`].
//!
//! Services check uniqueness and references before writing, but two requests
//! can still race past the same check. The losing insert then fails on a
//! constraint, and this module turns that failure into the same client error
//! the pre-check would have produced.

use anyhow::anyhow;
use sqlx::error::ErrorKind;

use coursedesk_core::AppError;

/// Constraint names declared in `migrations/`.
pub mod constraints {
    pub const USERS_USERNAME: &str = "users_username_key";
    pub const USERS_STUDENT: &str = "users_student_id_key";
    pub const STUDENTS_EMAIL: &str = "students_email_key";
    pub const COURSES_CODE: &str = "courses_course_code_key";
    pub const STUDENTS_COURSE_FK: &str = "students_course_id_fkey";
}

pub const DUPLICATE_ENTRY: &str = "Duplicate entry. This record already exists.";
pub const INVALID_REFERENCE: &str = "Invalid reference. The referenced record does not exist.";
pub const STILL_REFERENCED: &str = "Cannot delete. This record is referenced by other records.";

pub fn map_db_error(err: sqlx::Error) -> AppError {
    if let sqlx::Error::RowNotFound = err {
        return AppError::not_found(anyhow!("Record not found"));
    }

    let Some(db_err) = err.as_database_error() else {
        return AppError::database(err);
    };

    match db_err.kind() {
        ErrorKind::UniqueViolation => {
            AppError::conflict(anyhow!(unique_violation_message(db_err.constraint())))
        }
        ErrorKind::ForeignKeyViolation => {
            AppError::conflict(anyhow!(foreign_key_message(db_err.message())))
        }
        ErrorKind::CheckViolation | ErrorKind::NotNullViolation => {
            AppError::validation(anyhow!("Invalid data: {}", db_err.message()))
        }
        _ => AppError::database(err),
    }
}

fn unique_violation_message(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some(constraints::USERS_USERNAME) => "Username already exists",
        Some(constraints::STUDENTS_EMAIL) => "Email already exists",
        Some(constraints::COURSES_CODE) => "Course code already exists",
        _ => DUPLICATE_ENTRY,
    }
}

// Postgres reports a blocked delete as "update or delete on table ... violates
// foreign key constraint"; a bad insert reports "insert or update on table ...".
fn foreign_key_message(message: &str) -> &'static str {
    if message.starts_with("update or delete") {
        STILL_REFERENCED
    } else {
        INVALID_REFERENCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_messages_per_constraint() {
        assert_eq!(
            unique_violation_message(Some("users_username_key")),
            "Username already exists"
        );
        assert_eq!(
            unique_violation_message(Some("students_email_key")),
            "Email already exists"
        );
        assert_eq!(
            unique_violation_message(Some("courses_course_code_key")),
            "Course code already exists"
        );
        assert_eq!(unique_violation_message(Some("other_key")), DUPLICATE_ENTRY);
        assert_eq!(unique_violation_message(None), DUPLICATE_ENTRY);
    }

    #[test]
    fn test_foreign_key_direction() {
        assert_eq!(
            foreign_key_message(
                "update or delete on table \"courses\" violates foreign key constraint \"students_course_id_fkey\" on table \"students\""
            ),
            STILL_REFERENCED
        );
        assert_eq!(
            foreign_key_message(
                "insert or update on table \"students\" violates foreign key constraint \"students_course_id_fkey\""
            ),
            INVALID_REFERENCE
        );
    }

    #[test]
    fn test_non_constraint_errors() {
        assert_eq!(map_db_error(sqlx::Error::RowNotFound).status.as_u16(), 404);
        assert_eq!(map_db_error(sqlx::Error::PoolTimedOut).status.as_u16(), 500);
    }
}
