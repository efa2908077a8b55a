use std::fmt;
use std::str::FromStr;

use crate::{ConfigError, EnvSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Test => "test",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            "test" => Ok(Environment::Test),
            other => Err(format!("unknown environment `{}`", other)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub metrics_enabled: bool,
}

impl ServerConfig {
    pub fn from_source(source: &EnvSource) -> Result<Self, ConfigError> {
        Ok(Self {
            host: source.get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: source.parse_or("PORT", 3000)?,
            environment: source.parse_or("APP_ENV", Environment::default())?,
            metrics_enabled: source.bool_or("METRICS_ENABLED", true)?,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
