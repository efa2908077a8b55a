use crate::{ConfigError, EnvSource};

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn from_source(source: &EnvSource) -> Result<Self, ConfigError> {
        Ok(Self {
            url: source.require("DATABASE_URL")?,
            max_connections: source.parse_or("DATABASE_MAX_CONNECTIONS", 10)?,
            run_migrations: source.bool_or("DATABASE_RUN_MIGRATIONS", true)?,
        })
    }
}

// The URL carries credentials.
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .field("run_migrations", &self.run_migrations)
            .finish()
    }
}
