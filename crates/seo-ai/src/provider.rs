//! Provider wire formats.
//!
//! Request bodies and reply text extraction are pure so they can be tested
//! without network access.

use seo_config::AiProvider;
use serde_json::{Value, json};

use crate::AiError;

const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

const OPENAI_MODEL: &str = "gpt-4o-mini";
const ANTHROPIC_MODEL: &str = "claude-3-5-haiku-latest";

/// Reply length cap in tokens.
const MAX_TOKENS: u32 = 500;

/// Provider endpoint, headers and body for one request.
#[derive(Debug)]
pub(crate) struct ProviderRequest {
    pub url: &'static str,
    pub headers: Vec<(&'static str, String)>,
    pub body: Value,
}

/// Model used when none is configured.
pub(crate) fn default_model(provider: AiProvider) -> &'static str {
    match provider {
        AiProvider::OpenAi => OPENAI_MODEL,
        AiProvider::Anthropic => ANTHROPIC_MODEL,
    }
}

/// Build the request for a provider.
pub(crate) fn build_request(
    provider: AiProvider,
    api_key: &str,
    model: &str,
    system: &str,
    user: &str,
) -> ProviderRequest {
    match provider {
        AiProvider::OpenAi => ProviderRequest {
            url: OPENAI_URL,
            headers: vec![("Authorization", format!("Bearer {api_key}"))],
            body: json!({
                "model": model,
                "max_tokens": MAX_TOKENS,
                "temperature": 0.7,
                "messages": [
                    {"role": "system", "content": system},
                    {"role": "user", "content": user},
                ],
            }),
        },
        AiProvider::Anthropic => ProviderRequest {
            url: ANTHROPIC_URL,
            headers: vec![
                ("x-api-key", api_key.to_owned()),
                ("anthropic-version", ANTHROPIC_VERSION.to_owned()),
            ],
            body: json!({
                "model": model,
                "max_tokens": MAX_TOKENS,
                "system": system,
                "messages": [
                    {"role": "user", "content": user},
                ],
            }),
        },
    }
}

/// Pull the assistant text out of a successful reply body.
pub(crate) fn reply_text(provider: AiProvider, body: &Value) -> Result<String, AiError> {
    let text = match provider {
        AiProvider::OpenAi => body
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str),
        AiProvider::Anthropic => body
            .get("content")
            .and_then(Value::as_array)
            .and_then(|blocks| {
                blocks
                    .iter()
                    .find(|b| b.get("type").and_then(Value::as_str) == Some("text"))
            })
            .and_then(|block| block.get("text"))
            .and_then(Value::as_str),
    };

    text.map(str::to_owned)
        .ok_or_else(|| AiError::JsonParse("reply carries no text content".to_owned()))
}

/// Error message from an error reply body; falls back to the raw body.
///
/// Both providers use `{"error": {"message": ...}}`.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| body.trim().to_owned())
}
