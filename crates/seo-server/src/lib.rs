//! HTTP server for XML sitemaps and the virtual robots.txt.
//!
//! This crate provides an axum server serving:
//! - The sitemap index, paginated section sitemaps and the XSL view
//! - `robots.txt` compiled from settings
//! - A publish hook that triggers search engine pings
//!
//! # Routes
//!
//! | Route | Response |
//! |---|---|
//! | `GET /sitemap_index.xml` | Sitemap index |
//! | `GET /{file}.xml` | Post type, taxonomy or author sitemap page |
//! | `GET /sitemap.xml` | 301 to `/sitemap_index.xml` |
//! | `GET /sitemap.xsl` | XSL stylesheet |
//! | `GET /robots.txt` | Virtual robots.txt (when enabled) |
//! | `POST /api/publish` | `{"ping": "dispatched" \| "disabled" \| "not_qualified" \| "rate_limited"}` |
//! | `GET /health` | `ok` |
//!
//! # Architecture
//!
//! ```text
//! Crawler ──HTTP──► axum router (seo-server)
//!                        │
//!                        ├─► Sitemap routes ──► SitemapService ──► ContentIndex
//!                        │                            │
//!                        │                            └─► LastModCache ──► Cache
//!                        │
//!                        ├─► robots.txt ──► seo_robots::render(Config)
//!                        │
//!                        └─► Publish hook ──► PingNotifier ──► detached thread
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use seo_cache::{Cache, FileCache, MemoryCache};
use seo_config::Config;
use seo_content::{ContentIndex, EntityKind, MemoryContentIndex};
use state::AppState;

/// Open the configured cache.
///
/// A disabled file cache still gets a process-local memory cache, so the
/// lastmod memo and the ping rate limit keep working.
#[must_use]
pub fn open_cache(config: &Config, version: &str) -> Box<dyn Cache> {
    if config.cache_resolved.enabled {
        tracing::info!(dir = %config.cache_resolved.dir.display(), "Using file cache");
        Box::new(FileCache::new(config.cache_resolved.dir.clone(), version))
    } else {
        Box::new(MemoryCache::new())
    }
}

/// Load the content index and apply the taxonomy seeding migration.
///
/// # Errors
///
/// Returns an error if the content export cannot be loaded.
pub fn load_content(config: &mut Config) -> Result<MemoryContentIndex, seo_content::ContentError> {
    let index = MemoryContentIndex::from_export(&config.content_resolved.export)?;
    if config.seed_taxonomies(&index.type_names(EntityKind::Term)) {
        tracing::warn!(
            "sitemap.taxonomies is not set; seeded from registered taxonomies for this run. \
             Add it to the configuration to make the allow-list explicit"
        );
    }
    Ok(index)
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Loaded configuration
/// * `version` - Application version (for cache invalidation)
///
/// # Errors
///
/// Returns an error if the content export cannot be loaded or the server
/// fails to start.
pub async fn run_server(mut config: Config, version: &str) -> Result<(), Box<dyn std::error::Error>> {
    let index = load_content(&mut config)?;
    let cache = open_cache(&config, version);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.server.host, config.server.port))?;

    let state = Arc::new(AppState::new(config, Arc::new(index), cache.as_ref()));
    let app = app::create_router(state);

    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}
