//! Domain models for Medira.
//!
//! These are the core types shared across all crates. Each entity struct
//! is paired with a `CreateX` input struct that is validated once at the
//! service boundary.

pub mod appointment;
pub mod department;
pub mod doctor;
pub mod hospital;
pub mod medical_record;
pub mod patient;
pub mod session;
pub mod user;
