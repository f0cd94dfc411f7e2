//! Publish notification endpoint.
//!
//! The content store calls this after an entity is published; qualifying
//! events trigger a rate-limited search engine ping.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use seo_ping::{PingOutcome, PublishEvent};
use serde::Serialize;

use crate::state::AppState;

/// Response for POST /api/publish.
#[derive(Serialize)]
pub(crate) struct PublishResponse {
    /// What happened to the ping.
    ping: PingOutcome,
}

/// Handle POST /api/publish.
pub(crate) async fn post_publish(
    State(state): State<Arc<AppState>>,
    Json(event): Json<PublishEvent>,
) -> Json<PublishResponse> {
    let included = state.config.sitemap.enabled
        && state.sitemap.qualifies(event.kind, &event.type_name);
    let ping = state.ping.notify_publish(&event, included);

    tracing::info!(
        kind = %event.kind,
        type_name = %event.type_name,
        id = event.id,
        ping = ?ping,
        "Publish event received"
    );

    Json(PublishResponse { ping })
}
