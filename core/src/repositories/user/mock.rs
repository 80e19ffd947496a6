//! In-memory implementation of UserRepository for tests and local runs

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

use super::trait_::UserRepository;

/// Mock user repository backed by a vector
#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl MockUserRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding the given users
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    /// Add a user, assigning the next id
    pub async fn insert(&self, mut user: User) -> User {
        let mut users = self.users.write().await;
        user.id = users.len() as u64 + 1;
        users.push(user.clone());
        user
    }

    /// Number of stored users
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn is_phone_exist(&self, phone: &str) -> Result<bool, DomainError> {
        let users = self.users.read().await;
        Ok(users.iter().any(|u| u.has_phone() && u.phone == phone))
    }

    async fn is_email_exist(&self, email: &str) -> Result<bool, DomainError> {
        let users = self.users.read().await;
        Ok(users.iter().any(|u| u.has_email() && u.email == email))
    }
}
