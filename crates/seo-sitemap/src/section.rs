//! Sitemap section addressing.
//!
//! File names are a wire contract other tools depend on:
//!
//! | Section | Page 1 | Page n > 1 |
//! |---|---|---|
//! | post type | `{type}-sitemap.xml` | `{type}-sitemap{n}.xml` |
//! | taxonomy | `{tax}-taxonomy-sitemap.xml` | `{tax}-taxonomy-sitemap{n}.xml` |
//! | authors | `author-sitemap.xml` | `author-sitemap{n}.xml` |
//!
//! Page 1 never carries a suffix, so `post-sitemap1.xml` is not an address.

use std::fmt;

use seo_config::is_type_name;
use seo_content::{AUTHOR_TYPE, EntityKind};

/// A uniquely addressable page of a sitemap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapSection {
    /// Entity kind listed on this page.
    pub kind: EntityKind,
    /// Post type, taxonomy slug, or `author`.
    pub type_name: String,
    /// 1-based page number.
    pub page: usize,
}

impl SitemapSection {
    /// Create a section address.
    #[must_use]
    pub fn new(kind: EntityKind, type_name: impl Into<String>, page: usize) -> Self {
        Self {
            kind,
            type_name: type_name.into(),
            page,
        }
    }

    /// Wire file name of this page.
    #[must_use]
    pub fn file_name(&self) -> String {
        let suffix = if self.page > 1 {
            self.page.to_string()
        } else {
            String::new()
        };
        match self.kind {
            EntityKind::Post => format!("{}-sitemap{suffix}.xml", self.type_name),
            EntityKind::Term => format!("{}-taxonomy-sitemap{suffix}.xml", self.type_name),
            EntityKind::Author => format!("{AUTHOR_TYPE}-sitemap{suffix}.xml"),
        }
    }

    /// Parse a wire file name.
    ///
    /// Returns `None` for anything that is not a section address, including
    /// `sitemap_index.xml`, explicit `1`/`0` suffixes, zero-padded page
    /// numbers and type names outside `[a-z0-9_-]`.
    #[must_use]
    pub fn parse(file_name: &str) -> Option<Self> {
        let stem = file_name.strip_suffix(".xml")?;
        let (base, page) = split_page(stem)?;

        let (kind, type_name) = if let Some(taxonomy) = base.strip_suffix("-taxonomy-sitemap") {
            (EntityKind::Term, taxonomy)
        } else if base == "author-sitemap" {
            (EntityKind::Author, AUTHOR_TYPE)
        } else {
            (EntityKind::Post, base.strip_suffix("-sitemap")?)
        };

        is_type_name(type_name).then(|| Self::new(kind, type_name, page))
    }
}

impl fmt::Display for SitemapSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name())
    }
}

/// Split a trailing page number off a file stem.
fn split_page(stem: &str) -> Option<(&str, usize)> {
    let digits = stem.len() - stem.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return Some((stem, 1));
    }

    let (base, number) = stem.split_at(stem.len() - digits);
    if number.starts_with('0') {
        return None;
    }
    let page: usize = number.parse().ok()?;
    (page > 1).then_some((base, page))
}
