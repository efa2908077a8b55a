//! # Coursedesk Auth
//!
//! Authentication types and JWT utilities for the Coursedesk API.
//!
//! - [`role`]: The closed set of access levels, [`Role::Admin`] and [`Role::Student`]
//! - [`claims`]: The claim set carried by an access token
//! - [`jwt`]: Token creation and verification
//!
//! Tokens are stateless: the server keeps no session, and a token is trusted
//! once its signature and expiry check out. Callers are still expected to
//! re-load the user named by `sub` before acting on it.
//!
//! # Example
//!
//! ```ignore
//! use coursedesk_auth::{Role, create_access_token, verify_token};
//! use coursedesk_config::JwtConfig;
//!
//! let token = create_access_token(user_id, Role::Student, &jwt_config)?;
//! let claims = verify_token(&token, &jwt_config)?;
//! assert_eq!(claims.role, Role::Student);
//! ```

pub mod claims;
pub mod jwt;
pub mod role;

pub use claims::Claims;
pub use jwt::{TokenError, create_access_token, verify_token};
pub use role::{Role, UnknownRole};
