//! 对象缓存层
//!
//! 目前只有基于 Moka 的进程内实现，主要用于缓存访问令牌对应的会话。

pub mod memory;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;

pub use memory::MokaCacheWrapper;

use crate::config::AppConfig;

#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
}

/// 基于 JSON 的类型化读写
pub async fn get_json<T: DeserializeOwned>(cache: &dyn ObjectCache, key: &str) -> CacheResult<T> {
    match cache.get_raw(key).await {
        CacheResult::Found(json) => match serde_json::from_str::<T>(&json) {
            Ok(value) => CacheResult::Found(value),
            Err(e) => {
                tracing::debug!("Dropping undecodable cache entry {}: {}", key, e);
                cache.remove(key).await;
                CacheResult::NotFound
            }
        },
        CacheResult::NotFound => CacheResult::NotFound,
    }
}

pub async fn insert_json<T: Serialize>(cache: &dyn ObjectCache, key: String, value: &T, ttl: u64) {
    match serde_json::to_string(value) {
        Ok(json) => cache.insert_raw(key, json, ttl).await,
        Err(e) => tracing::warn!("Failed to serialize cache entry {}: {}", key, e),
    }
}

/// 创建缓存实例
pub fn create_cache() -> Arc<dyn ObjectCache> {
    let config = AppConfig::get();
    Arc::new(MokaCacheWrapper::new(
        config.cache.memory.max_capacity,
        config.cache.default_ttl,
    ))
}
