//! Authentication request and response models.
//!
//! This module re-exports auth models from the `coursedesk-models` crate.

pub use coursedesk_models::auth::*;
