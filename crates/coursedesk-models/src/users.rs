//! Login accounts.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use coursedesk_auth::Role;

use crate::ids::{StudentId, UserId};

/// A row of `users`. Holds the password hash, so it is never serialized.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub user_id: UserId,
    pub username: String,
    pub password: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    /// Set exactly when `role` is STUDENT.
    pub student_id: Option<StudentId>,
    pub created_at: DateTime<Utc>,
}

/// The public view of a user returned by login and registration.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
    pub student_id: Option<StudentId>,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username.clone(),
            role: user.role,
            student_id: user.student_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_info_uses_camel_case() {
        let info = UserInfo {
            user_id: UserId(1),
            username: "ada".to_string(),
            role: Role::Student,
            student_id: Some(StudentId(9)),
        };
        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["userId"], 1);
        assert_eq!(value["role"], "STUDENT");
        assert_eq!(value["studentId"], 9);
    }
}
