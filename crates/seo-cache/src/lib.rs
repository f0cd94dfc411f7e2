//! Cache abstraction layer for the SEO sitemap service.
//!
//! This crate provides generic caching traits that decouple cache consumers
//! (the sitemap `lastmod` memo, the ping rate-limit marker) from the
//! underlying storage mechanism. Two traits form the core API:
//!
//! - [`Cache`]: Factory for named cache buckets
//! - [`CacheBucket`]: Key-value store with time-based expiry
//!
//! Entries are invalidated by time only. Writers never coordinate: the last
//! write wins, and readers may observe a value up to its TTL old.
//!
//! # Implementations
//!
//! - [`NullCache`] / [`NullCacheBucket`]: No-op implementations (always miss)
//! - [`MemoryCache`]: Process-local map shared by all bucket handles
//! - [`FileCache`]: File-based implementation with version validation
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use seo_cache::{Cache, MemoryCache};
//!
//! let cache = MemoryCache::new();
//! let bucket = cache.bucket("lastmod");
//! bucket.set("post", b"2025-01-01T00:00:00+00:00", Duration::from_secs(3600));
//! assert!(bucket.get("post").is_some());
//! ```

mod ext;
mod file;
mod memory;

use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub use ext::CacheBucketExt;
pub use file::FileCache;
pub use memory::MemoryCache;

/// A named partition within a [`Cache`].
///
/// Each bucket stores key-value pairs that expire after the TTL given at
/// write time.
pub trait CacheBucket: Send + Sync {
    /// Retrieve a cached value.
    ///
    /// Returns `Some(value)` if the key exists and has not expired.
    ///
    /// # Arguments
    ///
    /// * `key` - Cache key (e.g., `post:page`)
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Store a value in the cache.
    ///
    /// Overwrites any existing entry for the same key. A zero `ttl` stores an
    /// entry that is already expired.
    ///
    /// # Arguments
    ///
    /// * `key` - Cache key
    /// * `value` - Raw bytes to cache
    /// * `ttl` - Time until the entry expires
    fn set(&self, key: &str, value: &[u8], ttl: Duration);

    /// Remove an entry. Missing keys are ignored.
    fn remove(&self, key: &str);
}

/// Factory for named cache [`CacheBucket`]s.
///
/// A `Cache` produces buckets that are logically isolated from each other.
pub trait Cache: Send + Sync {
    /// Open or create a named bucket.
    ///
    /// Calling `bucket` multiple times with the same name returns handles
    /// that share the same underlying storage.
    ///
    /// # Arguments
    ///
    /// * `name` - Bucket name (e.g., "lastmod", "ping")
    fn bucket(&self, name: &str) -> Box<dyn CacheBucket>;
}

/// No-op [`CacheBucket`] that never stores or retrieves data.
pub struct NullCacheBucket;

impl CacheBucket for NullCacheBucket {
    fn get(&self, _key: &str) -> Option<Vec<u8>> {
        None
    }

    fn set(&self, _key: &str, _value: &[u8], _ttl: Duration) {}

    fn remove(&self, _key: &str) {}
}

/// No-op [`Cache`] that always returns [`NullCacheBucket`]s.
///
/// Use when caching is disabled. Note that with a null cache the ping
/// marker is never observed, so pings are not rate limited.
pub struct NullCache;

impl Cache for NullCache {
    fn bucket(&self, _name: &str) -> Box<dyn CacheBucket> {
        Box::new(NullCacheBucket)
    }
}

/// Milliseconds since the Unix epoch at which an entry written now with
/// `ttl` expires.
pub(crate) fn expiry_millis(ttl: Duration) -> u64 {
    let expires = SystemTime::now() + ttl;
    millis_since_epoch(expires)
}

/// True if an entry with the given expiry timestamp is no longer valid.
pub(crate) fn is_expired(expires_at: u64) -> bool {
    millis_since_epoch(SystemTime::now()) >= expires_at
}

fn millis_since_epoch(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
