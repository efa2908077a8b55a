use sqlx::PgPool;

use coursedesk_config::{AppConfig, CorsConfig, Environment, JwtConfig, PasswordConfig};
use coursedesk_db::init_db_pool;

/// Shared by every handler: the connection pool plus immutable configuration.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub password_config: PasswordConfig,
    pub cors_config: CorsConfig,
    pub environment: Environment,
}

impl AppState {
    pub fn new(db: PgPool, config: &AppConfig) -> Self {
        Self {
            db,
            jwt_config: config.jwt.clone(),
            password_config: config.password.clone(),
            cors_config: config.cors.clone(),
            environment: config.server.environment,
        }
    }
}

pub async fn init_app_state(config: &AppConfig) -> Result<AppState, sqlx::Error> {
    let db = init_db_pool(&config.database).await?;
    Ok(AppState::new(db, config))
}
