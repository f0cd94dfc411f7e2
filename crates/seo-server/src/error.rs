//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use seo_content::ContentError;
use seo_sitemap::SitemapError;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Requested document does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Content index failure.
    #[error("Content index error: {0}")]
    Content(#[source] ContentError),
}

impl From<SitemapError> for ServerError {
    fn from(err: SitemapError) -> Self {
        match err {
            SitemapError::NotFound(name) => Self::NotFound(name),
            SitemapError::Content(e) => Self::Content(e),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match &self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "Not Found").into_response(),
            Self::Content(e) => {
                tracing::error!(error = %e, "Content index failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
