//! Error types for metadata generation.

/// Metadata generation error.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// No API key configured.
    #[error("No API key configured for the AI provider")]
    NoApiKey,

    /// Nothing to summarize.
    #[error("Content is empty")]
    EmptyContent,

    /// Provider returned an error status.
    #[error("AI provider error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Provider error message, or the raw body.
        message: String,
    },

    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed")]
    Http(#[from] ureq::Error),

    /// Reply did not contain a usable JSON object.
    #[error("Could not parse AI response as JSON: {0}")]
    JsonParse(String),

    /// Reply JSON lacks required fields.
    #[error("AI response is missing fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
}
