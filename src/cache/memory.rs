use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use std::time::{Duration, Instant};
use tracing::debug;

use super::{CacheResult, ObjectCache};

/// 缓存值及其存活时间
type Entry = (String, Duration);

// 按条目过期：每个条目带自己的 TTL
struct EntryExpiry;

impl Expiry<String, Entry> for EntryExpiry {
    fn expire_after_create(&self, _key: &String, value: &Entry, _created_at: Instant) -> Option<Duration> {
        Some(value.1)
    }
}

pub struct MokaCacheWrapper {
    inner: Cache<String, Entry>,
    default_ttl: Duration,
}

impl MokaCacheWrapper {
    pub fn new(max_capacity: u64, default_ttl: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(EntryExpiry)
            .build();

        debug!(
            "MokaCacheWrapper initialized with max capacity: {}",
            max_capacity
        );
        Self {
            inner,
            default_ttl: Duration::from_secs(default_ttl),
        }
    }
}

#[async_trait]
impl ObjectCache for MokaCacheWrapper {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        if let Some((value, _)) = self.inner.get(key).await {
            debug!("Successfully retrieved key: {}", key);
            CacheResult::Found(value)
        } else {
            debug!("Key not found in cache: {}", key);
            CacheResult::NotFound
        }
    }

    // ttl 为 0 时使用默认 TTL
    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let ttl = if ttl == 0 {
            self.default_ttl
        } else {
            Duration::from_secs(ttl)
        };
        self.inner.insert(key, (value, ttl)).await;
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{get_json, insert_json};

    #[tokio::test]
    async fn test_insert_get_remove() {
        let cache = MokaCacheWrapper::new(100, 60);
        cache.insert_raw("k".into(), "v".into(), 0).await;
        assert_eq!(cache.get_raw("k").await, CacheResult::Found("v".to_string()));

        cache.remove("k").await;
        assert_eq!(cache.get_raw("k").await, CacheResult::NotFound);
    }

    #[tokio::test]
    async fn test_json_helpers_drop_bad_entries() {
        let cache = MokaCacheWrapper::new(100, 60);
        insert_json(&cache, "nums".into(), &vec![1, 2, 3], 0).await;
        assert_eq!(
            get_json::<Vec<i32>>(&cache, "nums").await,
            CacheResult::Found(vec![1, 2, 3])
        );

        cache.insert_raw("bad".into(), "not json".into(), 0).await;
        assert_eq!(get_json::<Vec<i32>>(&cache, "bad").await, CacheResult::NotFound);
        assert_eq!(cache.get_raw("bad").await, CacheResult::NotFound);
    }

    #[tokio::test]
    async fn test_per_entry_ttl() {
        let cache = MokaCacheWrapper::new(100, 60);
        cache.insert_raw("short".into(), "v".into(), 1).await;
        cache.insert_raw("long".into(), "v".into(), 0).await;

        std::thread::sleep(Duration::from_millis(1100));

        assert_eq!(cache.get_raw("short").await, CacheResult::NotFound);
        assert_eq!(cache.get_raw("long").await, CacheResult::Found("v".to_string()));
    }
}
