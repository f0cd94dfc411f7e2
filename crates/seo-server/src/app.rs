//! Router construction.
//!
//! Builds the axum router with all routes and middleware. Sitemap and
//! robots routes exist only while their feature is enabled.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::headers;
use crate::state::AppState;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/publish", post(handlers::publish::post_publish));

    if state.config.sitemap.enabled {
        // Static routes take precedence over the `{file}` capture.
        let sitemap_routes = Router::new()
            .route("/sitemap_index.xml", get(handlers::sitemap::get_index))
            .route("/sitemap.xml", get(handlers::sitemap::redirect_legacy))
            .route("/sitemap.xsl", get(handlers::sitemap::get_stylesheet))
            .route("/{file}", get(handlers::sitemap::get_section))
            .layer(
                ServiceBuilder::new()
                    .layer(headers::robots_tag_layer())
                    .layer(headers::sitemap_cache_layer()),
            );
        router = router.merge(sitemap_routes);
    }

    if state.config.robots.enabled {
        router = router.route("/robots.txt", get(handlers::robots::get_robots));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(headers::content_type_options_layer()),
        )
        .with_state(state)
}
