//! XML sitemap generation.
//!
//! Turns a [`ContentIndex`](seo_content::ContentIndex) into the sitemap index,
//! paginated section pages and the XSL browser view.
//!
//! # Architecture
//!
//! - [`paginate`]: page arithmetic
//! - [`SitemapSection`]: the file naming wire contract and its parser
//! - [`ChangeFreq`] and [`Priority`]: crawler hints
//! - [`LastModCache`]: TTL memo of section modification times
//! - [`SitemapService`]: renders documents, addressed by file name
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use chrono::Utc;
//! use seo_cache::NullCache;
//! use seo_content::{Entity, EntityKind, MemoryContentIndex};
//! use seo_sitemap::{LastModCache, SitemapService, SitemapSettings};
//!
//! let index = MemoryContentIndex::new()
//!     .with_post_type("post")
//!     .with_entity(Entity::new(1, EntityKind::Post, "post", "https://example.com/hello/", Utc::now()));
//! let settings = SitemapSettings {
//!     site_url: "https://example.com".to_owned(),
//!     page_size: 1000,
//!     post_types: vec!["post".to_owned()],
//!     taxonomies: Vec::new(),
//!     include_authors: false,
//!     include_images: false,
//!     home_id: None,
//! };
//! let service = SitemapService::new(
//!     settings,
//!     Arc::new(index),
//!     LastModCache::new(&NullCache, Duration::from_secs(3600)),
//! );
//!
//! let xml = service.render("sitemap_index.xml", Utc::now()).unwrap();
//! assert!(xml.contains("<loc>https://example.com/post-sitemap.xml</loc>"));
//! ```

mod hints;
mod images;
mod lastmod;
pub mod paginate;
mod section;
mod service;
mod xml;
mod xsl;

use seo_content::ContentError;

pub use hints::{ChangeFreq, PAGE_TYPE, Priority};
pub use images::MAX_IMAGES_PER_URL;
pub use lastmod::LastModCache;
pub use section::SitemapSection;
pub use service::{INDEX_FILE, STYLESHEET_FILE, SitemapService, SitemapSettings};
pub use xsl::SITEMAP_XSL;

/// Sitemap generation error.
#[derive(Debug, thiserror::Error)]
pub enum SitemapError {
    /// The requested document does not exist.
    #[error("Sitemap not found: {0}")]
    NotFound(String),

    /// The content index failed.
    #[error("Content index error: {0}")]
    Content(#[source] ContentError),
}

impl SitemapError {
    /// Classify a content index error. Unknown types become `NotFound`.
    pub(crate) fn from_content(err: ContentError) -> Self {
        if err.is_not_found() {
            let name = err
                .type_name
                .as_deref()
                .unwrap_or("unknown")
                .to_owned();
            Self::NotFound(name)
        } else {
            Self::Content(err)
        }
    }

    /// Whether this error maps to a missing document.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
