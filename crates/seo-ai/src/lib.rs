//! AI-generated SEO metadata.
//!
//! [`MetaGenerator`] asks an LLM provider (OpenAI chat completions or the
//! Anthropic messages API) for a title, meta description, keywords and Open
//! Graph fields, and parses the reply defensively.
//!
//! Requests are validated before any network access: a missing API key
//! fails with [`AiError::NoApiKey`] and blank content with
//! [`AiError::EmptyContent`].

mod error;
mod extract;
mod provider;

use std::fmt::Write;
use std::time::Duration;

use seo_config::{AiConfig, AiProvider};
use serde::Serialize;
use serde_json::Value;
use ureq::Agent;

pub use error::AiError;
pub use extract::REQUIRED_FIELDS;

/// Content beyond this many characters is cut before sending.
pub const MAX_CONTENT_CHARS: usize = 6000;

const SYSTEM_PROMPT: &str = "You are an SEO assistant. Given a web page, reply with a single JSON \
object and nothing else. The object must have these keys: \"title\" (at most 60 characters), \
\"description\" (at most 160 characters), \"keywords\" (an array of 5 to 8 short phrases), \
\"og_title\" and \"og_description\" (for social sharing).";

/// Input for metadata generation.
#[derive(Debug, Clone, Default)]
pub struct MetaRequest {
    /// Current page title, if any.
    pub title: Option<String>,
    /// Page body (HTML or plain text).
    pub content: String,
    /// Keyword the page should rank for.
    pub focus_keyword: Option<String>,
}

/// Generated metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeoMeta {
    /// Page title, requested at 60 characters or fewer.
    pub title: String,
    /// Meta description, requested at 160 characters or fewer.
    pub description: String,
    /// Short keyword phrases, blanks removed.
    pub keywords: Vec<String>,
    /// Open Graph title for social sharing.
    pub og_title: String,
    /// Open Graph description for social sharing.
    pub og_description: String,
}

/// Client for one configured provider.
pub struct MetaGenerator {
    provider: AiProvider,
    api_key: String,
    model: String,
    agent: Agent,
}

impl MetaGenerator {
    /// Create a generator from settings.
    #[must_use]
    pub fn from_config(config: &AiConfig) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            provider: config.provider,
            api_key: config.api_key.trim().to_owned(),
            model: config
                .model
                .clone()
                .unwrap_or_else(|| provider::default_model(config.provider).to_owned()),
            agent,
        }
    }

    /// Model the requests are sent to.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate metadata for a page.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::NoApiKey`] or [`AiError::EmptyContent`] without
    /// contacting the provider, [`AiError::Api`] for error statuses,
    /// [`AiError::JsonParse`] or [`AiError::MissingFields`] for unusable
    /// replies.
    pub fn generate(&self, request: &MetaRequest) -> Result<SeoMeta, AiError> {
        if self.api_key.is_empty() {
            return Err(AiError::NoApiKey);
        }
        let content = request.content.trim();
        if content.is_empty() {
            return Err(AiError::EmptyContent);
        }

        let prompt = user_prompt(request, content);
        let call = provider::build_request(
            self.provider,
            &self.api_key,
            &self.model,
            SYSTEM_PROMPT,
            &prompt,
        );

        tracing::info!(provider = ?self.provider, model = %self.model, "Requesting SEO metadata");

        let mut builder = self
            .agent
            .post(call.url)
            .header("Content-Type", "application/json");
        for (name, value) in &call.headers {
            builder = builder.header(*name, value);
        }
        let response = builder.send_json(&call.body)?;

        let status = response.status().as_u16();
        let mut body = response.into_body();

        if status >= 400 {
            let error_body = body
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(AiError::Api {
                status,
                message: provider::error_message(&error_body),
            });
        }

        let reply: Value = body.read_json()?;
        let text = provider::reply_text(self.provider, &reply)?;
        let object = extract::extract_json(&text)?;
        extract::parse_meta(&object)
    }
}

/// User message: optional title and focus keyword, then the content.
fn user_prompt(request: &MetaRequest, content: &str) -> String {
    let mut prompt = String::new();
    if let Some(title) = request.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        let _ = writeln!(prompt, "Current title: {title}");
    }
    if let Some(keyword) = request
        .focus_keyword
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
    {
        let _ = writeln!(prompt, "Focus keyword: {keyword}");
    }
    prompt.push_str("Content:\n");
    prompt.push_str(truncate(content));
    prompt
}

/// Cut `content` to [`MAX_CONTENT_CHARS`] characters.
fn truncate(content: &str) -> &str {
    match content.char_indices().nth(MAX_CONTENT_CHARS) {
        Some((end, _)) => {
            tracing::debug!(chars = MAX_CONTENT_CHARS, "Truncating content for AI request");
            &content[..end]
        }
        None => content,
    }
}
