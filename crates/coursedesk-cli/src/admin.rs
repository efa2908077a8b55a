//! Admin account creation.

use anyhow::{Context, bail};
use sqlx::PgPool;

use coursedesk_auth::Role;
use coursedesk_core::password::hash_password;

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;

/// Creates an ADMIN login and returns its id.
pub async fn create_admin(
    db: &PgPool,
    username: &str,
    password: &str,
    bcrypt_cost: u32,
) -> anyhow::Result<i64> {
    let username = username.trim();
    if username.chars().count() < MIN_USERNAME_LEN {
        bail!("Username must be at least {MIN_USERNAME_LEN} characters");
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        bail!("Password must be at least {MIN_PASSWORD_LEN} characters");
    }

    let taken: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
            .bind(username)
            .fetch_one(db)
            .await
            .context("Failed to check username")?;
    if taken {
        bail!("Username already exists");
    }

    let password_hash = hash_password(password, bcrypt_cost).map_err(|e| e.error)?;

    let user_id = sqlx::query_scalar(
        r#"INSERT INTO users (username, password, role)
           VALUES ($1, $2, $3)
           RETURNING user_id"#,
    )
    .bind(username)
    .bind(&password_hash)
    .bind(Role::Admin.as_str())
    .fetch_one(db)
    .await
    .context("Failed to insert admin")?;

    Ok(user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_creates_admin_with_hashed_password(pool: PgPool) {
        let user_id = create_admin(&pool, " root ", "s3cret-pass", 4).await.unwrap();

        let (username, password, role): (String, String, String) =
            sqlx::query_as("SELECT username, password, role FROM users WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&pool)
                .await
                .unwrap();

        assert_eq!(username, "root");
        assert_eq!(role, "ADMIN");
        assert!(password.starts_with("$2b$04$"));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_rejects_duplicates_and_short_input(pool: PgPool) {
        create_admin(&pool, "root", "s3cret-pass", 4).await.unwrap();

        let dup = create_admin(&pool, "root", "another-pass", 4).await.unwrap_err();
        assert_eq!(dup.to_string(), "Username already exists");

        assert!(create_admin(&pool, "ab", "s3cret-pass", 4).await.is_err());
        assert!(create_admin(&pool, "admin2", "12345", 4).await.is_err());
    }
}
