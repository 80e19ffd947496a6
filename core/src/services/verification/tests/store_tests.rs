//! Tests for the provided check/verify logic of CodeStore

use crate::services::verification::{CheckOutcome, CodeStore};

use super::mocks::MockCodeStore;

#[tokio::test]
async fn test_set_then_verify() {
    let store = MockCodeStore::new(false);
    store.set("13800000000", "1234").await.unwrap();

    assert!(store.verify("13800000000", "1234", false).await.unwrap());
    assert!(!store.verify("13800000000", "0000", false).await.unwrap());
}

#[tokio::test]
async fn test_verify_without_clear_keeps_entry() {
    let store = MockCodeStore::new(false);
    store.set("13800000000", "1234").await.unwrap();

    assert!(store.verify("13800000000", "1234", false).await.unwrap());
    assert!(store.verify("13800000000", "1234", false).await.unwrap());
}

#[tokio::test]
async fn test_verify_with_clear_consumes_entry() {
    let store = MockCodeStore::new(false);
    store.set("13800000000", "1234").await.unwrap();

    assert!(store.verify("13800000000", "1234", true).await.unwrap());
    assert!(!store.verify("13800000000", "1234", true).await.unwrap());
    assert_eq!(store.stored("13800000000"), None);
}

#[tokio::test]
async fn test_mismatch_with_clear_keeps_entry() {
    let store = MockCodeStore::new(false);
    store.set("13800000000", "1234").await.unwrap();

    assert_eq!(
        store.check("13800000000", "9999", true).await.unwrap(),
        CheckOutcome::Mismatch
    );
    assert_eq!(store.stored("13800000000"), Some("1234".to_string()));
}

#[tokio::test]
async fn test_missing_key_is_not_an_error() {
    let store = MockCodeStore::new(false);

    assert_eq!(
        store.check("13900000000", "1234", false).await.unwrap(),
        CheckOutcome::Missing
    );
    assert!(!store.verify("13900000000", "1234", false).await.unwrap());
}

#[tokio::test]
async fn test_set_overwrites_previous_code() {
    let store = MockCodeStore::new(false);
    store.set("13800000000", "1111").await.unwrap();
    store.set("13800000000", "2222").await.unwrap();

    assert!(!store.verify("13800000000", "1111", false).await.unwrap());
    assert!(store.verify("13800000000", "2222", false).await.unwrap());
}

#[tokio::test]
async fn test_store_errors_propagate() {
    let store = MockCodeStore::new(true);
    assert!(store.verify("13800000000", "1234", false).await.is_err());
}
