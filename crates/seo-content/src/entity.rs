//! Content entity model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Type name shared by every author entity.
pub const AUTHOR_TYPE: &str = "author";

/// Kind of publishable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A post of some post type (`post`, `page`, custom types).
    Post,
    /// A taxonomy term (`category`, `post_tag`, custom taxonomies).
    Term,
    /// An author archive.
    Author,
}

impl EntityKind {
    /// Lowercase name, used in cache keys and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Term => "term",
            Self::Author => "author",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Publication status as seen by the sitemap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityStatus {
    /// Published and eligible for the sitemap.
    #[default]
    Published,
    /// Explicitly excluded from the sitemap.
    Excluded,
}

/// A publishable entity owned by the host content store.
///
/// Read-only to this service. `type_name` is the post type for posts, the
/// taxonomy slug for terms, and [`AUTHOR_TYPE`] for authors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Identifier, unique within `(kind, type_name)`.
    pub id: u64,
    /// Entity kind.
    pub kind: EntityKind,
    /// Post type, taxonomy slug, or `author`.
    pub type_name: String,
    /// Absolute permalink.
    pub url: String,
    /// Last modification time.
    pub modified_at: DateTime<Utc>,
    /// Publication status.
    #[serde(default)]
    pub status: EntityStatus,
    /// Flagged no-index by an editor.
    #[serde(default)]
    pub noindex: bool,
    /// Featured image URL (posts only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    /// Rendered HTML body, scanned for inline images (posts only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Entity {
    /// Create a published, indexable entity.
    #[must_use]
    pub fn new(
        id: u64,
        kind: EntityKind,
        type_name: impl Into<String>,
        url: impl Into<String>,
        modified_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind,
            type_name: type_name.into(),
            url: url.into(),
            modified_at,
            status: EntityStatus::Published,
            noindex: false,
            featured_image: None,
            content: None,
        }
    }

    /// Set the publication status.
    #[must_use]
    pub fn with_status(mut self, status: EntityStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the no-index flag.
    #[must_use]
    pub fn with_noindex(mut self, noindex: bool) -> Self {
        self.noindex = noindex;
        self
    }

    /// Attach a featured image URL.
    #[must_use]
    pub fn with_featured_image(mut self, url: impl Into<String>) -> Self {
        self.featured_image = Some(url.into());
        self
    }

    /// Attach rendered HTML content.
    #[must_use]
    pub fn with_content(mut self, html: impl Into<String>) -> Self {
        self.content = Some(html.into());
        self
    }

    /// True if the entity belongs in a sitemap.
    #[must_use]
    pub fn is_indexable(&self) -> bool {
        self.status == EntityStatus::Published && !self.noindex
    }
}
