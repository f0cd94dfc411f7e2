//! In-process cache implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::{Cache, CacheBucket, expiry_millis, is_expired};

#[derive(Debug)]
struct Entry {
    expires_at: u64,
    value: Vec<u8>,
}

type Buckets = HashMap<String, HashMap<String, Entry>>;

/// Process-local [`Cache`].
///
/// All bucket handles share one map, so a value written through one handle
/// is visible through every other handle for the same bucket name. Expired
/// entries are dropped lazily on read.
#[derive(Default, Clone)]
pub struct MemoryCache {
    buckets: Arc<RwLock<Buckets>>,
}

impl MemoryCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cache for MemoryCache {
    fn bucket(&self, name: &str) -> Box<dyn CacheBucket> {
        Box::new(MemoryCacheBucket {
            name: name.to_owned(),
            buckets: Arc::clone(&self.buckets),
        })
    }
}

struct MemoryCacheBucket {
    name: String,
    buckets: Arc<RwLock<Buckets>>,
}

impl CacheBucket for MemoryCacheBucket {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        {
            let buckets = self.buckets.read().ok()?;
            let entry = buckets.get(&self.name)?.get(key)?;
            if !is_expired(entry.expires_at) {
                return Some(entry.value.clone());
            }
        }

        self.remove(key);
        None
    }

    fn set(&self, key: &str, value: &[u8], ttl: Duration) {
        // A poisoned lock only means another writer panicked; the cache is
        // optional, so skip the write.
        let Ok(mut buckets) = self.buckets.write() else {
            return;
        };
        buckets.entry(self.name.clone()).or_default().insert(
            key.to_owned(),
            Entry {
                expires_at: expiry_millis(ttl),
                value: value.to_vec(),
            },
        );
    }

    fn remove(&self, key: &str) {
        if let Ok(mut buckets) = self.buckets.write()
            && let Some(bucket) = buckets.get_mut(&self.name)
        {
            bucket.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn test_memory_bucket_set_and_get() {
        let cache = MemoryCache::new();
        let bucket = cache.bucket("lastmod");

        bucket.set("post", b"2025-01-01", HOUR);

        assert_eq!(bucket.get("post"), Some(b"2025-01-01".to_vec()));
    }

    #[test]
    fn test_memory_bucket_expired_entry_misses() {
        let cache = MemoryCache::new();
        let bucket = cache.bucket("lastmod");

        bucket.set("post", b"stale", Duration::ZERO);

        assert_eq!(bucket.get("post"), None);
    }

    #[test]
    fn test_memory_handles_share_storage() {
        let cache = MemoryCache::new();
        let writer = cache.bucket("ping");
        let reader = cache.bucket("ping");

        writer.set("marker", b"1", HOUR);

        assert_eq!(reader.get("marker"), Some(b"1".to_vec()));
    }

    #[test]
    fn test_memory_buckets_are_isolated() {
        let cache = MemoryCache::new();
        let alpha = cache.bucket("alpha");
        let beta = cache.bucket("beta");

        alpha.set("key", b"alpha-data", HOUR);

        assert_eq!(beta.get("key"), None);
    }

    #[test]
    fn test_memory_last_write_wins() {
        let cache = MemoryCache::new();
        let bucket = cache.bucket("lastmod");

        bucket.set("post", b"first", HOUR);
        bucket.set("post", b"second", HOUR);

        assert_eq!(bucket.get("post"), Some(b"second".to_vec()));
    }

    #[test]
    fn test_memory_remove() {
        let cache = MemoryCache::new();
        let bucket = cache.bucket("ping");

        bucket.set("marker", b"1", HOUR);
        bucket.remove("marker");
        bucket.remove("never-set");

        assert_eq!(bucket.get("marker"), None);
    }
}
