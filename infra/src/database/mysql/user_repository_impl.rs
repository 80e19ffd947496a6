//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use sqlx::MySqlPool;

use hub_core::errors::DomainError;
use hub_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn exists_by(&self, column: Column, value: &str) -> Result<bool, DomainError> {
        let count: i64 = sqlx::query_scalar(column.count_query())
            .bind(value)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(column = column.name(), error = %e, "User lookup failed");
                DomainError::Database {
                    message: format!("Failed to query users by {}: {}", column.name(), e),
                }
            })?;
        Ok(count > 0)
    }
}

#[derive(Debug, Clone, Copy)]
enum Column {
    Phone,
    Email,
}

impl Column {
    fn name(self) -> &'static str {
        match self {
            Column::Phone => "phone",
            Column::Email => "email",
        }
    }

    fn count_query(self) -> &'static str {
        match self {
            Column::Phone => "SELECT COUNT(*) FROM users WHERE phone = ?",
            Column::Email => "SELECT COUNT(*) FROM users WHERE email = ?",
        }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn is_phone_exist(&self, phone: &str) -> Result<bool, DomainError> {
        self.exists_by(Column::Phone, phone).await
    }

    async fn is_email_exist(&self, email: &str) -> Result<bool, DomainError> {
        self.exists_by(Column::Email, email).await
    }
}
