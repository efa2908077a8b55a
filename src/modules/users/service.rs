use anyhow::Context;
use sqlx::{PgExecutor, PgPool};
use tracing::instrument;

use coursedesk_auth::Role;
use coursedesk_core::AppError;
use coursedesk_db::map_db_error;

use crate::modules::users::model::User;
use coursedesk_models::{StudentId, UserId};

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn find_by_id(db: &PgPool, user_id: UserId) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT user_id, username, password, role, student_id, created_at
               FROM users
               WHERE user_id = $1"#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch user by ID")
        .map_err(AppError::database)?;

        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn find_by_username(db: &PgPool, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT user_id, username, password, role, student_id, created_at
               FROM users
               WHERE username = $1"#,
        )
        .bind(username)
        .fetch_optional(db)
        .await
        .context("Failed to fetch user by username")
        .map_err(AppError::database)?;

        Ok(user)
    }

    pub async fn username_exists(db: &PgPool, username: &str) -> Result<bool, AppError> {
        Ok(Self::find_by_username(db, username).await?.is_some())
    }

    /// Inserts a login. Runs on any executor so it can join a transaction.
    #[instrument(skip(executor, password_hash))]
    pub async fn create<'e, E>(
        executor: E,
        username: &str,
        password_hash: &str,
        role: Role,
        student_id: Option<StudentId>,
    ) -> Result<User, AppError>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, User>(
            r#"INSERT INTO users (username, password, role, student_id)
               VALUES ($1, $2, $3, $4)
               RETURNING user_id, username, password, role, student_id, created_at"#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(role.as_str())
        .bind(student_id)
        .fetch_one(executor)
        .await
        .map_err(map_db_error)
    }
}
