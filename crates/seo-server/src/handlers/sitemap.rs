//! Sitemap endpoints.
//!
//! Serves the sitemap index, section pages and the XSL stylesheet.
//! `X-Robots-Tag` and `Cache-Control` are added by the router.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use chrono::Utc;
use seo_sitemap::{INDEX_FILE, SITEMAP_XSL};

use crate::error::ServerError;
use crate::state::AppState;

const XML_CONTENT_TYPE: &str = "application/xml; charset=UTF-8";
const XSL_CONTENT_TYPE: &str = "text/xsl; charset=UTF-8";

/// Handle GET /`sitemap_index.xml`.
pub(crate) async fn get_index(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ServerError> {
    let xml = state.sitemap.render_index()?;
    Ok(([(header::CONTENT_TYPE, XML_CONTENT_TYPE)], xml))
}

/// Handle GET /{file}: a section page such as `post-sitemap2.xml`.
pub(crate) async fn get_section(
    Path(file): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ServerError> {
    if !file.ends_with(".xml") {
        return Err(ServerError::NotFound(file));
    }
    let xml = state.sitemap.render(&file, Utc::now())?;
    Ok(([(header::CONTENT_TYPE, XML_CONTENT_TYPE)], xml))
}

/// Handle GET /sitemap.xml: 301 to the index.
pub(crate) async fn redirect_legacy() -> impl IntoResponse {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, format!("/{INDEX_FILE}"))],
    )
}

/// Handle GET /sitemap.xsl.
pub(crate) async fn get_stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, XSL_CONTENT_TYPE)], SITEMAP_XSL)
}
