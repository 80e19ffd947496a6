//! # Gohub Core
//!
//! Core business logic for the Gohub backend: verification code issuance
//! and checking, image captchas, and the user lookups signup relies on.
//! Storage, delivery and rendering are reached through traits so the
//! infrastructure crate can plug in Redis, SMS providers and drivers.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::User;
pub use errors::{DomainError, DomainResult};
pub use repositories::{MockUserRepository, UserRepository};
pub use services::*;
