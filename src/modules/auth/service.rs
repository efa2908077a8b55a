use std::sync::OnceLock;

use anyhow::{Context, anyhow};
use sqlx::PgPool;
use tracing::instrument;

use coursedesk_auth::{Role, create_access_token};
use coursedesk_config::{JwtConfig, PasswordConfig};
use coursedesk_core::AppError;
use coursedesk_core::password::{
    hash_password, hash_password_blocking, verify_password, verify_password_blocking,
};
use coursedesk_models::{CourseId, UserInfo};

use crate::metrics::{track_login_failure, track_login_success, track_token_issued};
use crate::modules::auth::model::{AuthResponse, LoginRequest, RegisterRequest};
use crate::modules::courses::service::CourseService;
use crate::modules::students::service::{
    EMAIL_TAKEN, INVALID_COURSE, StudentService, USERNAME_TAKEN,
};
use crate::modules::users::service::UserService;

pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Hash compared against when the username is unknown, so both failure
/// paths pay for one bcrypt verification.
static DUMMY_HASH: OnceLock<String> = OnceLock::new();

/// Checks `password` against `hash`, or against [`DUMMY_HASH`] when there is
/// no user. Only a real hash can ever match.
async fn check_password(
    password: String,
    hash: Option<String>,
    bcrypt_cost: u32,
) -> Result<bool, AppError> {
    match hash {
        Some(hash) => verify_password_blocking(password, hash).await,
        None => {
            tokio::task::spawn_blocking(move || {
                let dummy = DUMMY_HASH.get_or_init(|| {
                    hash_password("coursedesk-timing", bcrypt_cost).unwrap_or_default()
                });
                let _ = verify_password(&password, dummy);
            })
            .await
            .map_err(|e| {
                AppError::internal_error(format!("Password verification task failed: {}", e))
            })?;
            Ok(false)
        }
    }
}

pub struct AuthService;

impl AuthService {
    /// Self-registration: a student record and its STUDENT login, written in
    /// one transaction.
    #[instrument(skip(db, dto, jwt_config, password_config), fields(username = %dto.username))]
    pub async fn register(
        db: &PgPool,
        dto: RegisterRequest,
        jwt_config: &JwtConfig,
        password_config: &PasswordConfig,
    ) -> Result<AuthResponse, AppError> {
        let course_id = CourseId::from(dto.course_id);

        if !CourseService::exists(db, course_id).await? {
            return Err(AppError::conflict(anyhow!(INVALID_COURSE)));
        }
        if StudentService::email_exists(db, &dto.email).await? {
            return Err(AppError::conflict(anyhow!(EMAIL_TAKEN)));
        }
        if UserService::username_exists(db, &dto.username).await? {
            return Err(AppError::conflict(anyhow!(USERNAME_TAKEN)));
        }

        let password_hash = hash_password_blocking(dto.password, password_config.bcrypt_cost).await?;

        let mut tx = db
            .begin()
            .await
            .context("Failed to begin transaction")
            .map_err(AppError::database)?;

        let student_id = StudentService::insert(&mut *tx, &dto.name, &dto.email, course_id).await?;
        let user = UserService::create(
            &mut *tx,
            &dto.username,
            &password_hash,
            Role::Student,
            Some(student_id),
        )
        .await?;

        tx.commit()
            .await
            .context("Failed to commit registration")
            .map_err(AppError::database)?;

        let token = create_access_token(user.user_id.into_inner(), user.role, jwt_config)?;
        track_token_issued();

        Ok(AuthResponse {
            token,
            user: UserInfo::from(&user),
            student: None,
        })
    }

    /// Unknown usernames and wrong passwords fail identically.
    #[instrument(skip(db, dto, jwt_config, password_config), fields(username = %dto.username))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
        password_config: &PasswordConfig,
    ) -> Result<AuthResponse, AppError> {
        let user = UserService::find_by_username(db, &dto.username).await?;

        let is_valid = check_password(
            dto.password,
            user.as_ref().map(|u| u.password.clone()),
            password_config.bcrypt_cost,
        )
        .await?;

        let user = match user {
            Some(user) if is_valid => user,
            Some(_) => {
                track_login_failure("wrong_password");
                return Err(AppError::unauthorized(INVALID_CREDENTIALS.to_string()));
            }
            None => {
                track_login_failure("unknown_user");
                return Err(AppError::unauthorized(INVALID_CREDENTIALS.to_string()));
            }
        };

        let token = create_access_token(user.user_id.into_inner(), user.role, jwt_config)?;
        track_token_issued();
        track_login_success(user.role.as_str());

        let student = match (user.role, user.student_id) {
            (Role::Student, Some(student_id)) => {
                StudentService::find_details(db, student_id).await?
            }
            _ => None,
        };

        Ok(AuthResponse {
            token,
            user: UserInfo::from(&user),
            student,
        })
    }
}
