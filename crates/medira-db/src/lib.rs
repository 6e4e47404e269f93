//! Medira Database — SurrealDB connection management and repository
//! implementations.
//!
//! This crate provides:
//! - Connection management ([`DbManager`], [`DbConfig`])
//! - Schema initialization and migrations ([`run_migrations`])
//! - Repository implementations for the `medira-core` traits
//! - The tenant-bound [`ClinicalScope`] handle that the presentation
//!   layer uses for all clinical data access

mod connection;
mod error;
mod schema;
mod scope;

pub mod repository;

pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use schema::{run_migrations, schema_v1};
pub use scope::ClinicalScope;
