//! Unit tests for the in-memory code store

use std::time::Duration;

use hub_core::services::verification::{CheckOutcome, CodeStore};

use crate::cache::MemoryCodeStore;

#[tokio::test]
async fn test_set_and_verify() {
    let store = MemoryCodeStore::new(Duration::from_secs(60));
    store.set("13800000000", "1234").await.unwrap();

    assert!(store.verify("13800000000", "1234", false).await.unwrap());
    assert!(!store.verify("13800000000", "0000", false).await.unwrap());
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_get_with_clear_removes_entry() {
    let store = MemoryCodeStore::new(Duration::from_secs(60));
    store.set("key", "value").await.unwrap();

    assert_eq!(store.get("key", true).await.unwrap(), Some("value".to_string()));
    assert_eq!(store.get("key", false).await.unwrap(), None);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_verify_with_clear_consumes() {
    let store = MemoryCodeStore::new(Duration::from_secs(60));
    store.set("13800000000", "1234").await.unwrap();

    assert!(store.verify("13800000000", "1234", true).await.unwrap());
    assert!(!store.verify("13800000000", "1234", true).await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_entries_expire() {
    let store = MemoryCodeStore::new(Duration::from_secs(60));
    store.set("13800000000", "1234").await.unwrap();

    tokio::time::advance(Duration::from_secs(59)).await;
    assert!(store.verify("13800000000", "1234", false).await.unwrap());

    tokio::time::advance(Duration::from_secs(2)).await;
    assert_eq!(
        store.check("13800000000", "1234", false).await.unwrap(),
        CheckOutcome::Missing
    );
    assert!(store.is_empty().await);
}

#[tokio::test(start_paused = true)]
async fn test_set_refreshes_expiry() {
    let store = MemoryCodeStore::new(Duration::from_secs(60));
    store.set("key", "first").await.unwrap();

    tokio::time::advance(Duration::from_secs(45)).await;
    store.set("key", "second").await.unwrap();

    tokio::time::advance(Duration::from_secs(45)).await;
    assert_eq!(store.get("key", false).await.unwrap(), Some("second".to_string()));
}
