//! # Infrastructure Layer
//!
//! Concrete implementations of the seams defined in `hub_core`:
//! - **Cache**: Redis client and the code stores built on it
//! - **SMS**: Aliyun and mock delivery channels
//! - **Captcha**: digit captcha rendering
//! - **Database**: MySQL pool and user repository using SQLx

/// Cache module - Redis client and code stores
pub mod cache;

/// Captcha module - image rendering
pub mod captcha;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// SMS module - delivery channels
pub mod sms;

use hub_core::errors::DomainError;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Cache(e) => DomainError::Store {
                message: e.to_string(),
            },
            InfrastructureError::Database(e) => DomainError::Database {
                message: e.to_string(),
            },
            other => DomainError::Internal {
                message: other.to_string(),
            },
        }
    }
}
