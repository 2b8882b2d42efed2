pub mod app_config;
pub mod redis_repo;
pub mod memory;

pub use redis_repo::{RedisClient, RedisNotificationStore, RedisReferralClickStore};
pub use memory::MemoryStore;
