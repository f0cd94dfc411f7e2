//! Memoized section `lastmod` values.

use std::time::Duration;

use chrono::{DateTime, Utc};
use seo_cache::{Cache, CacheBucket, CacheBucketExt};
use seo_content::{ContentError, EntityKind};

/// Cache bucket holding section `lastmod` values.
const BUCKET: &str = "lastmod";

/// Time-bounded memo of the newest modification per `(kind, type_name)`.
///
/// Populated lazily on index renders. There is no invalidation on content
/// change: a value can be up to `ttl` stale.
pub struct LastModCache {
    bucket: Box<dyn CacheBucket>,
    ttl: Duration,
}

impl LastModCache {
    /// Create a memo backed by the `lastmod` bucket of `cache`.
    #[must_use]
    pub fn new(cache: &dyn Cache, ttl: Duration) -> Self {
        Self {
            bucket: cache.bucket(BUCKET),
            ttl,
        }
    }

    /// Return the cached value, or compute it with `load` and store it.
    ///
    /// Absent values (`Ok(None)`) are not cached.
    pub fn get_or_load<F>(
        &self,
        kind: EntityKind,
        type_name: &str,
        load: F,
    ) -> Result<Option<DateTime<Utc>>, ContentError>
    where
        F: FnOnce() -> Result<Option<DateTime<Utc>>, ContentError>,
    {
        let key = format!("{kind}:{type_name}");

        if let Some(cached) = self
            .bucket
            .get_string(&key)
            .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
        {
            tracing::debug!(key = %key, "lastmod cache hit");
            return Ok(Some(cached.with_timezone(&Utc)));
        }

        let loaded = load()?;
        if let Some(value) = loaded {
            self.bucket.set_string(&key, &value.to_rfc3339(), self.ttl);
        }
        Ok(loaded)
    }
}
