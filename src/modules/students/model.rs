//! Student data models and DTOs.
//!
//! This module re-exports student models from the `coursedesk-models` crate.

pub use coursedesk_models::students::*;
