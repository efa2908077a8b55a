use crate::{ConfigError, EnvSource};

#[derive(Clone, Debug)]
pub struct PasswordConfig {
    pub bcrypt_cost: u32,
}

impl PasswordConfig {
    pub fn from_source(source: &EnvSource) -> Result<Self, ConfigError> {
        let bcrypt_cost = source.parse_or("BCRYPT_COST", 10)?;
        // bcrypt's accepted range.
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                name: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
                reason: "must be between 4 and 31".to_string(),
            });
        }
        Ok(Self { bcrypt_cost })
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self { bcrypt_cost: 10 }
    }
}
