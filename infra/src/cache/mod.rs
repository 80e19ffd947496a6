//! Cache module for code storage
//!
//! Provides the Redis client and the `CodeStore` implementations the
//! verification and captcha services write to.

pub mod memory_store;
pub mod redis_client;
pub mod redis_store;

#[cfg(test)]
mod tests;

pub use memory_store::MemoryCodeStore;
pub use redis_client::RedisClient;
pub use redis_store::RedisCodeStore;

// Re-export commonly used types
pub use hub_shared::config::CacheConfig;
