//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;
use std::time::Duration;

use seo_cache::Cache;
use seo_config::Config;
use seo_content::ContentIndex;
use seo_ping::PingNotifier;
use seo_sitemap::{LastModCache, SitemapService, SitemapSettings};

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Loaded settings (robots directives are compiled from these).
    pub(crate) config: Config,
    /// Sitemap renderer.
    pub(crate) sitemap: SitemapService,
    /// Search engine pinger.
    pub(crate) ping: PingNotifier,
}

impl AppState {
    /// Wire the services over a content index and cache.
    pub(crate) fn new(config: Config, index: Arc<dyn ContentIndex>, cache: &dyn Cache) -> Self {
        let ttl = Duration::from_secs(config.cache_resolved.lastmod_ttl_secs);
        let sitemap = SitemapService::new(
            SitemapSettings::from_config(&config),
            index,
            LastModCache::new(cache, ttl),
        );
        let ping = PingNotifier::new(&config, cache);

        Self {
            config,
            sitemap,
            ping,
        }
    }
}
