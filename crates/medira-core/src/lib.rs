//! Medira Core — domain models, error taxonomy, and repository trait
//! definitions for the multi-tenant hospital administration system.
//!
//! This crate is free of I/O: storage lives in `medira-db` and
//! authentication orchestration in `medira-auth`, both of which depend
//! on the traits defined here.

pub mod error;
pub mod models;
pub mod repository;
pub mod validate;

pub use error::{MediraError, MediraResult};
