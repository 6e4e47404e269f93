//! Medira Auth — password verification, opaque session tokens, and the
//! login/logout and hospital-registration flows.

pub mod config;
pub mod error;
pub mod password;
pub mod registration;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use registration::{RegistrationOutput, RegistrationService};
pub use service::{AuthService, LoginOutput};
