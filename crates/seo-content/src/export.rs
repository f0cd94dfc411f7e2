//! Content export loading.
//!
//! A content export is a JSON or YAML snapshot of the host content store:
//!
//! ```yaml
//! post_types: [post, page]
//! taxonomies: [category]
//! entities:
//!   - id: 1
//!     kind: post
//!     type_name: post
//!     url: https://example.com/hello/
//!     modified_at: 2025-01-01T00:00:00Z
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::entity::Entity;
use crate::index::{ContentError, ContentErrorKind};
use crate::memory::MemoryContentIndex;

const BACKEND: &str = "Export";

/// Deserialized content export.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContentExport {
    /// Registered post types.
    pub post_types: Vec<String>,
    /// Registered taxonomies.
    pub taxonomies: Vec<String>,
    /// All entities, in any order.
    pub entities: Vec<Entity>,
}

impl ContentExport {
    /// Read an export from disk, choosing the format by extension
    /// (`.yaml`/`.yml` for YAML, anything else as JSON).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing file, `Unavailable` for other I/O
    /// failures and `InvalidData` for parse errors.
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            let kind = if e.kind() == std::io::ErrorKind::NotFound {
                ContentErrorKind::NotFound
            } else {
                ContentErrorKind::Unavailable
            };
            ContentError::new(kind)
                .with_backend(BACKEND)
                .with_message(path.display().to_string())
                .with_source(e)
        })?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        let parsed = if is_yaml {
            serde_yaml::from_str(&content).map_err(|e| invalid_data(path).with_source(e))
        } else {
            serde_json::from_str(&content).map_err(|e| invalid_data(path).with_source(e))
        }?;

        Ok(parsed)
    }

    /// Build an index, rejecting entities of unregistered types and
    /// repeated entities.
    ///
    /// Entity ids are unique per kind: a post and a term may share an id,
    /// two posts may not.
    ///
    /// # Errors
    ///
    /// Returns `InvalidData` naming the first entity whose type is not
    /// registered, or the first id that appears twice for the same kind.
    pub fn into_index(self) -> Result<MemoryContentIndex, ContentError> {
        let mut index = MemoryContentIndex::new();
        for name in self.post_types {
            index = index.with_post_type(name);
        }
        for name in self.taxonomies {
            index = index.with_taxonomy(name);
        }

        if let Some(orphan) = self
            .entities
            .iter()
            .find(|e| !index.is_registered(e.kind, &e.type_name))
        {
            return Err(ContentError::new(ContentErrorKind::InvalidData)
                .with_type(orphan.kind, orphan.type_name.clone())
                .with_backend(BACKEND)
                .with_message(format!("entity {} has an unregistered type", orphan.id)));
        }

        let mut seen = HashSet::with_capacity(self.entities.len());
        if let Some(duplicate) = self.entities.iter().find(|e| !seen.insert((e.kind, e.id))) {
            return Err(ContentError::new(ContentErrorKind::InvalidData)
                .with_type(duplicate.kind, duplicate.type_name.clone())
                .with_backend(BACKEND)
                .with_message(format!("duplicate entity {}", duplicate.id)));
        }

        let total = self.entities.len();
        let index = index.with_entities(self.entities);
        tracing::info!(entities = total, "Loaded content export");
        Ok(index)
    }
}

fn invalid_data(path: &Path) -> ContentError {
    ContentError::new(ContentErrorKind::InvalidData)
        .with_backend(BACKEND)
        .with_message(path.display().to_string())
}

impl MemoryContentIndex {
    /// Load an index from a content export file.
    ///
    /// # Errors
    ///
    /// See [`ContentExport::load`] and [`ContentExport::into_index`].
    pub fn from_export(path: &Path) -> Result<Self, ContentError> {
        ContentExport::load(path)?.into_index()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::{ContentIndex, EntityKind};

    const JSON_EXPORT: &str = r#"{
        "post_types": ["post", "page"],
        "taxonomies": ["category"],
        "entities": [
            {"id": 1, "kind": "post", "type_name": "post",
             "url": "https://example.com/a/", "modified_at": "2025-01-02T00:00:00Z"},
            {"id": 2, "kind": "post", "type_name": "page",
             "url": "https://example.com/about/", "modified_at": "2025-01-01T00:00:00Z",
             "noindex": true},
            {"id": 3, "kind": "term", "type_name": "category",
             "url": "https://example.com/category/news/", "modified_at": "2025-01-01T00:00:00Z"}
        ]
    }"#;

    #[test]
    fn test_load_json_export() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("content.json");
        fs::write(&path, JSON_EXPORT).unwrap();

        let index = MemoryContentIndex::from_export(&path).unwrap();

        assert_eq!(index.count(EntityKind::Post, "post").unwrap(), 1);
        assert_eq!(index.count(EntityKind::Post, "page").unwrap(), 0);
        assert_eq!(index.count(EntityKind::Term, "category").unwrap(), 1);
    }

    #[test]
    fn test_load_yaml_export() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("content.yaml");
        fs::write(
            &path,
            "post_types: [post]\nentities:\n  - id: 1\n    kind: post\n    type_name: post\n    url: https://example.com/a/\n    modified_at: 2025-01-02T00:00:00Z\n",
        )
        .unwrap();

        let index = MemoryContentIndex::from_export(&path).unwrap();

        assert_eq!(index.count(EntityKind::Post, "post").unwrap(), 1);
    }

    #[test]
    fn test_missing_export_is_not_found() {
        let tmp = TempDir::new().unwrap();

        let err = MemoryContentIndex::from_export(&tmp.path().join("nope.json")).unwrap_err();

        assert_eq!(err.kind, ContentErrorKind::NotFound);
    }

    #[test]
    fn test_malformed_export_is_invalid_data() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("content.json");
        fs::write(&path, "{ not json").unwrap();

        let err = MemoryContentIndex::from_export(&path).unwrap_err();

        assert_eq!(err.kind, ContentErrorKind::InvalidData);
    }

    #[test]
    fn test_unregistered_entity_type_rejected() {
        let export = ContentExport {
            post_types: vec!["post".to_owned()],
            taxonomies: Vec::new(),
            entities: vec![Entity::new(
                8,
                EntityKind::Post,
                "recipe",
                "https://example.com/r/",
                chrono::Utc::now(),
            )],
        };

        let err = export.into_index().unwrap_err();

        assert_eq!(err.kind, ContentErrorKind::InvalidData);
        assert_eq!(err.type_name.as_deref(), Some("recipe"));
    }

    #[test]
    fn test_duplicate_entity_id_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("content.json");
        // The page reuses the id of the first post.
        let export = JSON_EXPORT.replacen(r#""id": 2"#, r#""id": 1"#, 1);
        fs::write(&path, export).unwrap();

        let err = MemoryContentIndex::from_export(&path).unwrap_err();

        assert_eq!(err.kind, ContentErrorKind::InvalidData);
        assert!(err.to_string().contains("duplicate entity 1"));
    }

    #[test]
    fn test_same_id_across_kinds_accepted() {
        let now = chrono::Utc::now();
        let export = ContentExport {
            post_types: vec!["post".to_owned()],
            taxonomies: vec!["category".to_owned()],
            entities: vec![
                Entity::new(5, EntityKind::Post, "post", "https://example.com/a/", now),
                Entity::new(5, EntityKind::Term, "category", "https://example.com/c/", now),
            ],
        };

        let index = export.into_index().unwrap();

        assert_eq!(index.count(EntityKind::Post, "post").unwrap(), 1);
        assert_eq!(index.count(EntityKind::Term, "category").unwrap(), 1);
    }
}
