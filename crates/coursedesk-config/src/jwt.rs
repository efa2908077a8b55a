use crate::{ConfigError, EnvSource};

/// Used outside production when `JWT_SECRET` is unset.
pub const DEFAULT_DEV_SECRET: &str = "coursedesk-dev-secret-change-me";

const DEFAULT_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Upper bound for `JWT_EXPIRES_IN`: one year.
pub const MAX_EXPIRY_SECONDS: i64 = 365 * 24 * 60 * 60;

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_seconds: i64,
}

impl JwtConfig {
    pub fn from_source(source: &EnvSource, production: bool) -> Result<Self, ConfigError> {
        let secret = match source.get("JWT_SECRET") {
            Some(secret) => secret,
            None if production => return Err(ConfigError::Missing("JWT_SECRET")),
            None => DEFAULT_DEV_SECRET.to_string(),
        };

        let expiry_seconds = match source.get("JWT_EXPIRES_IN") {
            None => DEFAULT_EXPIRY_SECONDS,
            Some(raw) => parse_duration(&raw).ok_or_else(|| ConfigError::Invalid {
                name: "JWT_EXPIRES_IN",
                value: raw.clone(),
                reason: "expected seconds or a duration such as 15m, 24h or 7d".to_string(),
            })?,
        };
        if expiry_seconds > MAX_EXPIRY_SECONDS {
            return Err(ConfigError::Invalid {
                name: "JWT_EXPIRES_IN",
                value: expiry_seconds.to_string(),
                reason: "must not exceed 365d".to_string(),
            });
        }

        Ok(Self {
            secret,
            expiry_seconds,
        })
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret == DEFAULT_DEV_SECRET
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiry_seconds", &self.expiry_seconds)
            .finish()
    }
}

/// Parses `3600`, `30s`, `15m`, `24h` or `7d` into seconds. Zero is rejected.
pub fn parse_duration(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let (digits, unit) = match raw.char_indices().last()? {
        (i, c) if c.is_ascii_alphabetic() => (&raw[..i], c.to_ascii_lowercase()),
        _ => (raw, 's'),
    };

    let value: i64 = digits.trim().parse().ok()?;
    let multiplier = match unit {
        's' => 1,
        'm' => 60,
        'h' => 60 * 60,
        'd' => 24 * 60 * 60,
        _ => return None,
    };

    value
        .checked_mul(multiplier)
        .filter(|seconds| *seconds > 0)
}
