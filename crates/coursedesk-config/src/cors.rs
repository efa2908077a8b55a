use crate::EnvSource;

#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_source(source: &EnvSource) -> Self {
        let allowed_origins = source
            .get("ALLOWED_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000,http://localhost:5173".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed_origins }
    }

    /// `*` in the list allows any origin.
    pub fn allows_any(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_and_trims() {
        let source = EnvSource::from_pairs([("ALLOWED_ORIGINS", "https://a.test, ,https://b.test ")]);
        let config = CorsConfig::from_source(&source);
        assert_eq!(config.allowed_origins, vec!["https://a.test", "https://b.test"]);
        assert!(!config.allows_any());
    }
}
