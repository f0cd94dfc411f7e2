//! Outbound HTTP for pings.

use std::time::Duration;

use ureq::Agent;

/// Ping request error.
#[derive(Debug, thiserror::Error)]
pub enum PingError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed")]
    Http(#[from] ureq::Error),
}

/// Issues a single GET request and reports the status code.
pub trait PingTransport: Send + Sync {
    /// Fetch `url`, discarding the body.
    fn get(&self, url: &str) -> Result<u16, PingError>;
}

/// [`PingTransport`] backed by a `ureq` agent.
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    /// Create a transport whose requests give up after `timeout`.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }
}

impl PingTransport for UreqTransport {
    fn get(&self, url: &str) -> Result<u16, PingError> {
        let response = self.agent.get(url).call()?;
        Ok(response.status().as_u16())
    }
}
