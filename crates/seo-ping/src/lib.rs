//! Search engine notification on publish.
//!
//! [`PingNotifier`] sends fire-and-forget GET requests carrying the sitemap
//! index URL to Google and Bing. At most one ping goes out per interval
//! (one hour by default), tracked by a marker in the `ping` cache bucket.
//! Two concurrent publishes may both pass the marker check; that is
//! tolerated.
//!
//! Pinging is best-effort: failures are logged at debug level and never
//! surfaced to the caller.

mod transport;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use seo_cache::{Cache, CacheBucket, CacheBucketExt};
use seo_config::Config;
use seo_content::{EntityKind, EntityStatus};
use serde::{Deserialize, Serialize};

pub use transport::{PingError, PingTransport, UreqTransport};

/// Google ping endpoint; the encoded index URL is appended.
pub const GOOGLE_PING: &str = "https://www.google.com/ping?sitemap=";
/// Bing ping endpoint; the encoded index URL is appended.
pub const BING_PING: &str = "https://www.bing.com/ping?sitemap=";

const BUCKET: &str = "ping";
const MARKER_KEY: &str = "last_ping";

/// Unreserved characters stay literal: A-Z a-z 0-9 - . _ ~
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// A content publish notification.
#[derive(Debug, Clone, Deserialize)]
pub struct PublishEvent {
    /// Entity kind.
    pub kind: EntityKind,
    /// Post type, taxonomy slug, or `author`.
    pub type_name: String,
    /// Entity id.
    pub id: u64,
    /// Publication status after the change.
    #[serde(default)]
    pub status: EntityStatus,
    /// Whether the entity is flagged no-index.
    #[serde(default)]
    pub noindex: bool,
}

impl PublishEvent {
    /// Whether the entity itself can appear in a sitemap.
    #[must_use]
    pub fn is_indexable(&self) -> bool {
        self.status == EntityStatus::Published && !self.noindex
    }
}

/// Result of a publish notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PingOutcome {
    /// Requests were handed to a background thread.
    Dispatched,
    /// Ping on publish is turned off.
    Disabled,
    /// The entity does not appear in the sitemap.
    NotQualified,
    /// A ping already went out within the interval.
    RateLimited,
}

/// Rate-limited search engine pinger.
pub struct PingNotifier {
    enabled: bool,
    index_url: String,
    interval: Duration,
    marker: Box<dyn CacheBucket>,
    transport: Arc<dyn PingTransport>,
}

impl PingNotifier {
    /// Create a notifier from settings, storing its marker in `cache`.
    #[must_use]
    pub fn new(config: &Config, cache: &dyn Cache) -> Self {
        let timeout = Duration::from_secs(config.ping.timeout_secs);
        Self {
            enabled: config.ping.on_publish && config.sitemap.enabled,
            index_url: config.sitemap_index_url(),
            interval: Duration::from_secs(config.ping.interval_secs),
            marker: cache.bucket(BUCKET),
            transport: Arc::new(UreqTransport::new(timeout)),
        }
    }

    /// Replace the HTTP transport.
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn PingTransport>) -> Self {
        self.transport = transport;
        self
    }

    /// Handle a publish event.
    ///
    /// `included` tells whether the event's type is listed in the sitemap.
    /// Never blocks on the network: requests run on a detached thread.
    pub fn notify_publish(&self, event: &PublishEvent, included: bool) -> PingOutcome {
        if !self.enabled {
            return PingOutcome::Disabled;
        }
        if !included || !event.is_indexable() {
            return PingOutcome::NotQualified;
        }
        if self.marker.get(MARKER_KEY).is_some() {
            tracing::debug!(id = event.id, "Ping skipped, already sent within interval");
            return PingOutcome::RateLimited;
        }

        self.marker
            .set_string(MARKER_KEY, &Utc::now().to_rfc3339(), self.interval);
        self.dispatch();
        PingOutcome::Dispatched
    }

    fn dispatch(&self) {
        let urls = ping_urls(&self.index_url);
        let transport = Arc::clone(&self.transport);

        let spawned = std::thread::Builder::new()
            .name("seo-ping".to_owned())
            .spawn(move || {
                for url in urls {
                    match transport.get(&url) {
                        Ok(status) if status < 400 => {
                            tracing::debug!(url = %url, status, "Ping sent");
                        }
                        Ok(status) => tracing::debug!(url = %url, status, "Ping rejected"),
                        Err(e) => tracing::debug!(url = %url, error = %e, "Ping failed"),
                    }
                }
            });
        if let Err(e) = spawned {
            tracing::debug!(error = %e, "Could not start ping thread");
        }
    }
}

/// Ping URLs for a sitemap index, Google first.
#[must_use]
pub fn ping_urls(index_url: &str) -> Vec<String> {
    let encoded = utf8_percent_encode(index_url, QUERY_ENCODE_SET).to_string();
    [GOOGLE_PING, BING_PING]
        .iter()
        .map(|endpoint| format!("{endpoint}{encoded}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Mutex;
    use std::sync::mpsc::{self, Receiver, Sender};

    use pretty_assertions::assert_eq;
    use seo_cache::MemoryCache;

    use super::*;

    struct RecordingTransport {
        sent: Mutex<Sender<String>>,
        status: u16,
    }

    impl PingTransport for RecordingTransport {
        fn get(&self, url: &str) -> Result<u16, PingError> {
            if let Ok(sender) = self.sent.lock() {
                let _ = sender.send(url.to_owned());
            }
            Ok(self.status)
        }
    }

    fn recording(status: u16) -> (Arc<RecordingTransport>, Receiver<String>) {
        let (tx, rx) = mpsc::channel();
        let transport = Arc::new(RecordingTransport {
            sent: Mutex::new(tx),
            status,
        });
        (transport, rx)
    }

    fn config(on_publish: bool) -> Config {
        let toml = format!(
            "[site]\nurl = \"https://example.com\"\n[ping]\non_publish = {on_publish}\n"
        );
        Config::from_toml_str(&toml, Path::new("/site")).unwrap()
    }

    fn event() -> PublishEvent {
        PublishEvent {
            kind: EntityKind::Post,
            type_name: "post".to_owned(),
            id: 42,
            status: EntityStatus::Published,
            noindex: false,
        }
    }

    fn received(rx: &Receiver<String>) -> Vec<String> {
        (0..2)
            .filter_map(|_| rx.recv_timeout(Duration::from_secs(5)).ok())
            .collect()
    }

    #[test]
    fn test_ping_urls_encode_index() {
        assert_eq!(
            ping_urls("https://example.com/sitemap_index.xml"),
            vec![
                "https://www.google.com/ping?sitemap=https%3A%2F%2Fexample.com%2Fsitemap_index.xml",
                "https://www.bing.com/ping?sitemap=https%3A%2F%2Fexample.com%2Fsitemap_index.xml",
            ]
        );
    }

    #[test]
    fn test_dispatches_to_both_engines() {
        let cache = MemoryCache::new();
        let (transport, rx) = recording(200);
        let notifier = PingNotifier::new(&config(true), &cache).with_transport(transport);

        assert_eq!(notifier.notify_publish(&event(), true), PingOutcome::Dispatched);
        assert_eq!(received(&rx), ping_urls("https://example.com/sitemap_index.xml"));
    }

    #[test]
    fn test_second_publish_within_interval_is_rate_limited() {
        let cache = MemoryCache::new();
        let (transport, rx) = recording(200);
        let notifier = PingNotifier::new(&config(true), &cache).with_transport(transport);

        assert_eq!(notifier.notify_publish(&event(), true), PingOutcome::Dispatched);
        assert_eq!(notifier.notify_publish(&event(), true), PingOutcome::RateLimited);
        assert_eq!(received(&rx).len(), 2);
        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
    }

    #[test]
    fn test_marker_is_shared_through_cache() {
        let cache = MemoryCache::new();
        let (transport, _rx) = recording(200);
        let first = PingNotifier::new(&config(true), &cache)
            .with_transport(Arc::clone(&transport) as Arc<dyn PingTransport>);
        let second = PingNotifier::new(&config(true), &cache).with_transport(transport);

        first.notify_publish(&event(), true);

        assert_eq!(second.notify_publish(&event(), true), PingOutcome::RateLimited);
    }

    #[test]
    fn test_disabled() {
        let cache = MemoryCache::new();
        let (transport, rx) = recording(200);
        let notifier = PingNotifier::new(&config(false), &cache).with_transport(transport);

        assert_eq!(notifier.notify_publish(&event(), true), PingOutcome::Disabled);
        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
    }

    #[test]
    fn test_not_qualified_does_not_consume_marker() {
        let cache = MemoryCache::new();
        let (transport, _rx) = recording(200);
        let notifier = PingNotifier::new(&config(true), &cache).with_transport(transport);
        let mut draft = event();
        draft.noindex = true;

        assert_eq!(notifier.notify_publish(&event(), false), PingOutcome::NotQualified);
        assert_eq!(notifier.notify_publish(&draft, true), PingOutcome::NotQualified);
        assert_eq!(notifier.notify_publish(&event(), true), PingOutcome::Dispatched);
    }

    #[test]
    fn test_rejected_ping_is_swallowed() {
        let cache = MemoryCache::new();
        let (transport, rx) = recording(503);
        let notifier = PingNotifier::new(&config(true), &cache).with_transport(transport);

        assert_eq!(notifier.notify_publish(&event(), true), PingOutcome::Dispatched);
        assert_eq!(received(&rx).len(), 2);
    }

    #[test]
    fn test_publish_event_defaults() {
        let event: PublishEvent =
            serde_json::from_str(r#"{"kind": "post", "type_name": "page", "id": 7}"#).unwrap();

        assert!(event.is_indexable());
        assert_eq!(event.kind, EntityKind::Post);
    }

    #[test]
    fn test_outcome_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&PingOutcome::RateLimited).unwrap(),
            "\"rate_limited\""
        );
    }
}
