//! # Coursedesk Config
//!
//! Configuration types for the Coursedesk API.
//!
//! Everything is read once at startup into an [`AppConfig`] which is then
//! passed to the components that need it:
//!
//! - [`server`]: bind address, environment, metrics toggle
//! - [`database`]: PostgreSQL connection settings
//! - [`jwt`]: token secret and lifetime
//! - [`password`]: bcrypt cost factor
//! - [`cors`]: allowed origins
//! - [`logging`]: log level, format and optional file output
//!
//! # Environment Variables
//!
//! | Variable | Default |
//! |---|---|
//! | `HOST` / `PORT` | `0.0.0.0` / `3000` |
//! | `APP_ENV` | `development` |
//! | `DATABASE_URL` | required |
//! | `DATABASE_MAX_CONNECTIONS` | `10` |
//! | `DATABASE_RUN_MIGRATIONS` | `true` |
//! | `JWT_SECRET` | dev secret; required in production |
//! | `JWT_EXPIRES_IN` | `24h` (at most `365d`) |
//! | `BCRYPT_COST` | `10` |
//! | `ALLOWED_ORIGINS` | `http://localhost:3000,http://localhost:5173` |
//! | `LOG_LEVEL` / `LOG_FORMAT` / `LOG_DIR` | `info` / compact / unset |
//! | `METRICS_ENABLED` | `true` |
//!
//! # Example
//!
//! ```ignore
//! use coursedesk_config::AppConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = AppConfig::from_env()?;
//! println!("listening on {}", config.server.bind_address());
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod logging;
pub mod password;
pub mod server;
pub mod source;

use thiserror::Error;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use logging::{LogConfig, LogFormat};
pub use password::PasswordConfig;
pub use server::{Environment, ServerConfig};
pub use source::EnvSource;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value `{value}` for {name}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
    pub cors: CorsConfig,
    pub log: LogConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(&EnvSource::system())
    }

    pub fn from_source(source: &EnvSource) -> Result<Self, ConfigError> {
        let server = ServerConfig::from_source(source)?;
        let jwt = JwtConfig::from_source(source, server.is_production())?;

        Ok(Self {
            database: DatabaseConfig::from_source(source)?,
            password: PasswordConfig::from_source(source)?,
            cors: CorsConfig::from_source(source),
            log: LogConfig::from_source(source)?,
            jwt,
            server,
        })
    }
}
