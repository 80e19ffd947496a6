//! Middleware modules for the API

pub mod access_log;
pub mod recovery;

pub use access_log::{AccessLog, MAX_LOGGED_BODY};
pub use recovery::Recovery;
