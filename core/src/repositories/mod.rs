//! Repository interfaces for persisted domain entities.

pub mod user;

pub use user::{MockUserRepository, UserRepository};
