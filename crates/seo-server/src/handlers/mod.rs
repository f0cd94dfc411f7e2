//! HTTP request handlers.

pub(crate) mod publish;
pub(crate) mod robots;
pub(crate) mod sitemap;

/// Handle GET /health.
pub(crate) async fn health() -> &'static str {
    "ok"
}
