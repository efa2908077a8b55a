//! Login account models.
//!
//! Re-exports the user types from the `coursedesk-models` crate.

pub use coursedesk_models::users::*;
