//! In-memory content index.
//!
//! Provides [`MemoryContentIndex`], used both as the runtime backend (loaded
//! from a content export) and for unit testing.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::entity::{AUTHOR_TYPE, Entity, EntityKind};
use crate::index::{ContentError, ContentErrorKind, ContentIndex};

const BACKEND: &str = "Memory";

/// In-memory [`ContentIndex`].
///
/// Only indexable entities are kept. Each `(kind, type_name)` bucket is kept
/// sorted by `modified_at` descending, then `id` ascending.
///
/// Entities of a type that was never registered are stored but unreachable:
/// queries for that type still fail with `NotFound`.
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use seo_content::{ContentIndex, Entity, EntityKind, MemoryContentIndex};
///
/// let index = MemoryContentIndex::new()
///     .with_taxonomy("category")
///     .with_entity(Entity::new(4, EntityKind::Term, "category", "https://example.com/category/news/", Utc::now()));
///
/// let page = index.list(EntityKind::Term, "category", 10, 0).unwrap();
/// assert_eq!(page.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryContentIndex {
    post_types: Vec<String>,
    taxonomies: Vec<String>,
    entities: HashMap<(EntityKind, String), Vec<Entity>>,
}

impl MemoryContentIndex {
    /// Create an empty index with no registered types.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a post type.
    #[must_use]
    pub fn with_post_type(mut self, name: impl Into<String>) -> Self {
        push_unique(&mut self.post_types, name.into());
        self
    }

    /// Register a taxonomy.
    #[must_use]
    pub fn with_taxonomy(mut self, name: impl Into<String>) -> Self {
        push_unique(&mut self.taxonomies, name.into());
        self
    }

    /// Add a single entity.
    #[must_use]
    pub fn with_entity(self, entity: Entity) -> Self {
        self.with_entities(std::iter::once(entity))
    }

    /// Add many entities, sorting each touched bucket once.
    #[must_use]
    pub fn with_entities(mut self, entities: impl IntoIterator<Item = Entity>) -> Self {
        let mut touched = Vec::new();
        for entity in entities.into_iter().filter(Entity::is_indexable) {
            let key = (entity.kind, entity.type_name.clone());
            if !touched.contains(&key) {
                touched.push(key.clone());
            }
            self.entities.entry(key).or_default().push(entity);
        }

        for key in touched {
            if let Some(bucket) = self.entities.get_mut(&key) {
                bucket.sort_by(|a, b| {
                    b.modified_at
                        .cmp(&a.modified_at)
                        .then_with(|| a.id.cmp(&b.id))
                });
            }
        }
        self
    }

    /// Check whether a type is registered for a kind.
    #[must_use]
    pub fn is_registered(&self, kind: EntityKind, type_name: &str) -> bool {
        match kind {
            EntityKind::Post => self.post_types.iter().any(|t| t == type_name),
            EntityKind::Term => self.taxonomies.iter().any(|t| t == type_name),
            EntityKind::Author => type_name == AUTHOR_TYPE,
        }
    }

    /// Sorted indexable entities of a registered type.
    fn bucket(&self, kind: EntityKind, type_name: &str) -> Result<&[Entity], ContentError> {
        if !self.is_registered(kind, type_name) {
            return Err(ContentError::unknown_type(kind, type_name).with_backend(BACKEND));
        }
        Ok(self
            .entities
            .get(&(kind, type_name.to_owned()))
            .map_or(&[], Vec::as_slice))
    }
}

fn push_unique(names: &mut Vec<String>, name: String) {
    if !names.contains(&name) {
        names.push(name);
    }
}

impl ContentIndex for MemoryContentIndex {
    fn count(&self, kind: EntityKind, type_name: &str) -> Result<usize, ContentError> {
        Ok(self.bucket(kind, type_name)?.len())
    }

    fn list(
        &self,
        kind: EntityKind,
        type_name: &str,
        page_size: usize,
        offset: usize,
    ) -> Result<Vec<Entity>, ContentError> {
        if page_size == 0 {
            return Err(ContentError::new(ContentErrorKind::InvalidQuery)
                .with_type(kind, type_name)
                .with_backend(BACKEND)
                .with_message("page size must be greater than 0"));
        }
        Ok(self
            .bucket(kind, type_name)?
            .iter()
            .skip(offset)
            .take(page_size)
            .cloned()
            .collect())
    }

    fn last_modified(
        &self,
        kind: EntityKind,
        type_name: &str,
    ) -> Result<Option<DateTime<Utc>>, ContentError> {
        Ok(self
            .bucket(kind, type_name)?
            .first()
            .map(|entity| entity.modified_at))
    }

    fn type_names(&self, kind: EntityKind) -> Vec<String> {
        match kind {
            EntityKind::Post => self.post_types.clone(),
            EntityKind::Term => self.taxonomies.clone(),
            EntityKind::Author => vec![AUTHOR_TYPE.to_owned()],
        }
    }
}
