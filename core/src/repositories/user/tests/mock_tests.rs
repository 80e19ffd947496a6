//! Unit tests for mock user repository

use crate::domain::entities::user::User;
use crate::repositories::user::{MockUserRepository, UserRepository};

#[tokio::test]
async fn test_mock_repository_phone_exist() {
    let repo = MockUserRepository::new();
    assert!(!repo.is_phone_exist("13812345678").await.unwrap());

    let created = repo.insert(User::new("alice", "13812345678", "")).await;
    assert_eq!(created.id, 1);

    assert!(repo.is_phone_exist("13812345678").await.unwrap());
    assert!(!repo.is_phone_exist("13912345678").await.unwrap());
}

#[tokio::test]
async fn test_mock_repository_email_exist() {
    let repo = MockUserRepository::with_users(vec![User::new("bob", "", "bob@example.com")]);

    assert!(repo.is_email_exist("bob@example.com").await.unwrap());
    assert!(!repo.is_email_exist("alice@example.com").await.unwrap());
}

#[tokio::test]
async fn test_empty_contact_never_matches() {
    let repo = MockUserRepository::new();
    repo.insert(User::new("carol", "", "carol@example.com")).await;
    repo.insert(User::new("dave", "13812345678", "")).await;

    assert!(!repo.is_phone_exist("").await.unwrap());
    assert!(!repo.is_email_exist("").await.unwrap());
    assert_eq!(repo.count().await, 2);
}
