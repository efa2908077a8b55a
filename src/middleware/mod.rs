//! Middleware and extractors for authentication and authorization.
//!
//! - [`auth`]: [`auth::AuthUser`], the verified identity of the caller
//! - [`role`]: Role gates, as route layers and as extractors
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. `AuthUser` verifies the token and re-loads the user it names
//! 3. A role gate compares the user's role with the one the route requires
//! 4. Handler executes if all checks pass
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, middleware, routing::get};
//! use crate::middleware::role::{RequireAdmin, require_admin};
//!
//! // As a layer over a whole router
//! let admin_routes = Router::new()
//!     .route("/", get(list_students))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
//!
//! // As an extractor on a single handler
//! async fn delete_course(_admin: RequireAdmin) -> impl IntoResponse { /* ... */ }
//! ```

pub mod auth;
pub mod role;
