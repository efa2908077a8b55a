use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::role::Role;

/// JWT claims for access tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    pub role: Role,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: i64,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// The numeric user id carried in `sub`, if it is one.
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialize() {
        let claims = Claims {
            sub: "42".to_string(),
            role: Role::Admin,
            exp: 1_700_086_400,
            iat: 1_700_000_000,
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""sub":"42""#));
        assert!(serialized.contains(r#""role":"ADMIN""#));
    }

    #[test]
    fn test_user_id() {
        let mut claims = Claims {
            sub: "7".to_string(),
            role: Role::Student,
            exp: 0,
            iat: 0,
        };
        assert_eq!(claims.user_id(), Some(7));

        claims.sub = "not-a-number".to_string();
        assert_eq!(claims.user_id(), None);
    }
}
