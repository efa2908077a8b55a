//! Course catalog models.
//!
//! Re-exports the course types from the `coursedesk-models` crate.

pub use coursedesk_models::courses::*;
