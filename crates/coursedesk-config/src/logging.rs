use std::path::PathBuf;

use crate::{ConfigError, EnvSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Clone, Debug)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
    /// Daily rolling JSON files are written here when set.
    pub directory: Option<PathBuf>,
}

impl LogConfig {
    pub fn from_source(source: &EnvSource) -> Result<Self, ConfigError> {
        let format = match source.get("LOG_FORMAT").map(|f| f.to_ascii_lowercase()) {
            None => LogFormat::Compact,
            Some(f) if f == "json" => LogFormat::Json,
            Some(f) if f == "compact" || f == "pretty" || f == "text" => LogFormat::Compact,
            Some(f) => {
                return Err(ConfigError::Invalid {
                    name: "LOG_FORMAT",
                    value: f,
                    reason: "expected `json` or `compact`".to_string(),
                });
            }
        };

        Ok(Self {
            level: source.get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            format,
            directory: source.get("LOG_DIR").map(PathBuf::from),
        })
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            directory: None,
        }
    }
}
