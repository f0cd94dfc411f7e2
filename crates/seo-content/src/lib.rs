//! Content index abstraction for the SEO sitemap service.
//!
//! This crate provides a [`ContentIndex`] trait that isolates sitemap
//! generation from the host content store. This enables:
//!
//! - **Unit testing** without a database
//! - **Backend flexibility** (export files, SQL, a CMS REST API)
//! - **Deterministic paging**: every backend orders entities the same way
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Entity`] and [`EntityKind`]: the read-only content model
//! - [`ContentIndex`] trait with `count()`, `list()`, `last_modified()` and
//!   `type_names()`
//! - [`MemoryContentIndex`]: in-memory backend, built programmatically or
//!   loaded from a JSON/YAML content export
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use seo_content::{ContentIndex, Entity, EntityKind, MemoryContentIndex};
//!
//! let index = MemoryContentIndex::new()
//!     .with_post_type("post")
//!     .with_entity(Entity::new(1, EntityKind::Post, "post", "https://example.com/hello/", Utc::now()));
//!
//! assert_eq!(index.count(EntityKind::Post, "post").unwrap(), 1);
//! assert!(index.count(EntityKind::Post, "recipe").is_err());
//! ```

mod entity;
mod export;
mod index;
mod memory;

pub use entity::{AUTHOR_TYPE, Entity, EntityKind, EntityStatus};
pub use export::ContentExport;
pub use index::{ContentError, ContentErrorKind, ContentIndex};
pub use memory::MemoryContentIndex;
