//! Content index trait and error types.
//!
//! Provides the core [`ContentIndex`] trait for enumerating publishable
//! entities, along with [`ContentError`] for unified error handling across
//! backends.

use chrono::{DateTime, Utc};

use crate::entity::{Entity, EntityKind};

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContentErrorKind {
    /// Unknown post type, taxonomy, or export file.
    NotFound,
    /// Query parameters are invalid (e.g., zero page size).
    InvalidQuery,
    /// Backend data could not be decoded.
    InvalidData,
    /// Backend is temporarily unavailable.
    Unavailable,
    /// Other/unknown error category.
    Other,
}

/// Content error with semantic kind and backend-specific source.
///
/// `NotFound` is deliberately distinct from an empty result: an unknown type
/// name is a 404 for the sitemap, while a known type with no entities is not.
#[derive(Debug)]
pub struct ContentError {
    /// Semantic error category.
    pub kind: ContentErrorKind,
    /// Entity kind the query was about (if applicable).
    pub entity_kind: Option<EntityKind>,
    /// Type name the query was about (if applicable).
    pub type_name: Option<String>,
    /// Backend identifier (e.g., "Memory").
    pub backend: Option<&'static str>,
    message: Option<String>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ContentError {
    /// Create a new content error.
    #[must_use]
    pub fn new(kind: ContentErrorKind) -> Self {
        Self {
            kind,
            entity_kind: None,
            type_name: None,
            backend: None,
            message: None,
            source: None,
        }
    }

    /// Attach the queried type.
    #[must_use]
    pub fn with_type(mut self, kind: EntityKind, type_name: impl Into<String>) -> Self {
        self.entity_kind = Some(kind);
        self.type_name = Some(type_name.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach a human-readable message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not found error for an unregistered type.
    #[must_use]
    pub fn unknown_type(kind: EntityKind, type_name: impl Into<String>) -> Self {
        Self::new(ContentErrorKind::NotFound).with_type(kind, type_name)
    }

    /// Check whether this error means "no such type".
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == ContentErrorKind::NotFound
    }
}

impl std::fmt::Display for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message: source (type: post/recipe)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            ContentErrorKind::NotFound => "Not found",
            ContentErrorKind::InvalidQuery => "Invalid query",
            ContentErrorKind::InvalidData => "Invalid data",
            ContentErrorKind::Unavailable => "Unavailable",
            ContentErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let (Some(kind), Some(type_name)) = (self.entity_kind, &self.type_name) {
            write!(f, " (type: {kind}/{type_name})")?;
        }

        Ok(())
    }
}

impl std::error::Error for ContentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Read-only view of the host content store.
///
/// Implementations exclude entities that are flagged no-index or excluded,
/// and order results by `modified_at` descending, then `id` ascending, so
/// that consecutive pages partition the entity list exactly.
pub trait ContentIndex: Send + Sync {
    /// Number of indexable entities of a type.
    ///
    /// # Errors
    ///
    /// Returns [`ContentErrorKind::NotFound`] if `type_name` is not registered
    /// for `kind`.
    fn count(&self, kind: EntityKind, type_name: &str) -> Result<usize, ContentError>;

    /// One page of indexable entities.
    ///
    /// # Arguments
    ///
    /// * `page_size` - Maximum number of entities returned (must be > 0)
    /// * `offset` - Number of entities to skip
    ///
    /// # Errors
    ///
    /// Returns [`ContentErrorKind::NotFound`] for unknown types and
    /// [`ContentErrorKind::InvalidQuery`] for a zero page size.
    fn list(
        &self,
        kind: EntityKind,
        type_name: &str,
        page_size: usize,
        offset: usize,
    ) -> Result<Vec<Entity>, ContentError>;

    /// Most recent modification time across indexable entities of a type.
    ///
    /// Returns `Ok(None)` for a known type with no indexable entities.
    ///
    /// # Errors
    ///
    /// Returns [`ContentErrorKind::NotFound`] for unknown types.
    fn last_modified(
        &self,
        kind: EntityKind,
        type_name: &str,
    ) -> Result<Option<DateTime<Utc>>, ContentError>;

    /// Registered type names for a kind, in registration order.
    ///
    /// Authors always report a single type, [`crate::AUTHOR_TYPE`].
    fn type_names(&self, kind: EntityKind) -> Vec<String>;
}
