//! Extension trait for [`CacheBucket`] with typed convenience methods.

use std::time::Duration;

use crate::CacheBucket;

/// Typed convenience methods for [`CacheBucket`].
///
/// Provides `get_string`/`set_string` for UTF-8 strings, so that
/// [`CacheBucket`] stays object-safe and implementors only handle raw bytes.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use seo_cache::{Cache, CacheBucketExt, MemoryCache};
///
/// let cache = MemoryCache::new();
/// let bucket = cache.bucket("lastmod");
///
/// bucket.set_string("post", "2025-01-01T00:00:00+00:00", Duration::from_secs(60));
/// assert_eq!(
///     bucket.get_string("post").as_deref(),
///     Some("2025-01-01T00:00:00+00:00")
/// );
/// ```
pub trait CacheBucketExt: CacheBucket {
    /// Retrieve a cached UTF-8 string.
    fn get_string(&self, key: &str) -> Option<String> {
        let bytes = self.get(key)?;
        String::from_utf8(bytes).ok()
    }

    /// Store a string value in the cache.
    fn set_string(&self, key: &str, value: &str, ttl: Duration) {
        self.set(key, value.as_bytes(), ttl);
    }
}

impl<B: CacheBucket + ?Sized> CacheBucketExt for B {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cache, MemoryCache};

    #[test]
    fn test_string_roundtrip_through_bucket() {
        let cache = MemoryCache::new();
        let bucket = cache.bucket("lastmod");

        bucket.set_string("post", "2025-06-01T12:00:00+00:00", Duration::from_secs(60));

        assert_eq!(
            bucket.get_string("post").as_deref(),
            Some("2025-06-01T12:00:00+00:00")
        );
    }

    #[test]
    fn test_get_string_rejects_invalid_utf8() {
        let cache = MemoryCache::new();
        let bucket = cache.bucket("lastmod");

        bucket.set("bad", &[0xFF, 0xFE], Duration::from_secs(60));

        assert_eq!(bucket.get_string("bad"), None);
    }
}
