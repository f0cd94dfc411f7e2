//! Response header layers.
//!
//! - `X-Content-Type-Options` on every response
//! - `X-Robots-Tag` and `Cache-Control` on successful sitemap responses

use axum::body::Body;
use axum::http::header::{CACHE_CONTROL, HeaderName};
use axum::http::{HeaderValue, Response};
use tower_http::set_header::SetResponseHeaderLayer;

/// Sitemaps are for crawlers; their pages stay out of search results.
const ROBOTS_TAG: &str = "noindex, follow";

/// Sitemap documents may be cached for an hour.
const SITEMAP_CACHE_CONTROL: &str = "max-age=3600";

/// Header value computed from the outgoing response.
type MakeValue = fn(&Response<Body>) -> Option<HeaderValue>;

/// Create layer that adds X-Content-Type-Options header.
pub(crate) fn content_type_options_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        HeaderName::from_static("x-content-type-options"),
        HeaderValue::from_static("nosniff"),
    )
}

/// Create layer that adds X-Robots-Tag header to 2xx responses.
pub(crate) fn robots_tag_layer() -> SetResponseHeaderLayer<MakeValue> {
    SetResponseHeaderLayer::overriding(
        HeaderName::from_static("x-robots-tag"),
        robots_tag_on_success as MakeValue,
    )
}

/// Create layer that adds Cache-Control header to 2xx responses.
pub(crate) fn sitemap_cache_layer() -> SetResponseHeaderLayer<MakeValue> {
    SetResponseHeaderLayer::overriding(CACHE_CONTROL, cache_control_on_success as MakeValue)
}

fn robots_tag_on_success(response: &Response<Body>) -> Option<HeaderValue> {
    on_success(response, ROBOTS_TAG)
}

fn cache_control_on_success(response: &Response<Body>) -> Option<HeaderValue> {
    on_success(response, SITEMAP_CACHE_CONTROL)
}

fn on_success(response: &Response<Body>, value: &'static str) -> Option<HeaderValue> {
    response
        .status()
        .is_success()
        .then(|| HeaderValue::from_static(value))
}
