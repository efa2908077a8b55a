//! # Coursedesk CLI
//!
//! Operator tooling for the Coursedesk API. Admin accounts can only be
//! created here; the HTTP API never grants the ADMIN role.
//!
//! ## Usage
//!
//! ```ignore
//! use coursedesk_cli::{admin::create_admin, seeder::seed_courses};
//!
//! create_admin(&pool, "root", "s3cret-pass", 10).await?;
//! seed_courses(&pool, 20).await?;
//! ```

pub mod admin;
pub mod seeder;
