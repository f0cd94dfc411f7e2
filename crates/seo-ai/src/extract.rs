//! Reply parsing.
//!
//! Models often wrap the requested JSON in prose or a Markdown fence, so the
//! object is located in three steps: the whole reply, the first fenced code
//! block, then the first balanced `{...}` span.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::AiError;
use crate::SeoMeta;

/// Fields every reply must carry, in report order.
pub const REQUIRED_FIELDS: [&str; 5] = [
    "title",
    "description",
    "keywords",
    "og_title",
    "og_description",
];

static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```[a-zA-Z]*\s*\n?(.*?)```").unwrap());

/// Locate and parse the JSON object in a model reply.
pub(crate) fn extract_json(text: &str) -> Result<Map<String, Value>, AiError> {
    let trimmed = text.trim();

    if let Some(object) = parse_object(trimmed) {
        return Ok(object);
    }
    if let Some(object) = FENCE_RE
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .and_then(|body| parse_object(body.as_str().trim()))
    {
        return Ok(object);
    }
    if let Some(object) = first_balanced_object(trimmed).and_then(parse_object) {
        return Ok(object);
    }

    Err(AiError::JsonParse(preview(trimmed)))
}

/// Build metadata from a reply object.
///
/// Every absent or blank field is reported at once.
pub(crate) fn parse_meta(object: &Map<String, Value>) -> Result<SeoMeta, AiError> {
    let text = |key: &str| {
        object
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    };
    let keywords = object.get("keywords").map(keyword_list).unwrap_or_default();

    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| match **field {
            "keywords" => keywords.is_empty(),
            other => text(other).is_none(),
        })
        .map(|field| (*field).to_owned())
        .collect();
    if !missing.is_empty() {
        return Err(AiError::MissingFields(missing));
    }

    Ok(SeoMeta {
        title: text("title").unwrap_or_default(),
        description: text("description").unwrap_or_default(),
        keywords,
        og_title: text("og_title").unwrap_or_default(),
        og_description: text("og_description").unwrap_or_default(),
    })
}

/// Keywords as an array of strings or a comma-separated string.
fn keyword_list(value: &Value) -> Vec<String> {
    let raw: Vec<&str> = match value {
        Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
        Value::String(list) => list.split(',').collect(),
        _ => Vec::new(),
    };
    raw.into_iter()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_owned)
        .collect()
}

fn parse_object(candidate: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str(candidate) {
        Ok(Value::Object(object)) => Some(object),
        _ => None,
    }
}

/// First `{...}` span whose braces balance, ignoring braces inside strings.
fn first_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0_usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

fn preview(text: &str) -> String {
    const MAX: usize = 200;
    match text.char_indices().nth(MAX) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const OBJECT: &str = r#"{"title": "T", "description": "D", "keywords": ["a", "b"], "og_title": "OT", "og_description": "OD"}"#;

    #[test]
    fn test_plain_json() {
        let object = extract_json(OBJECT).unwrap();

        assert_eq!(object["title"], "T");
    }

    #[test]
    fn test_fenced_json() {
        let reply = format!("Here you go:\n```json\n{OBJECT}\n```\nEnjoy!");

        let object = extract_json(&reply).unwrap();

        assert_eq!(object["og_title"], "OT");
    }

    #[test]
    fn test_json_embedded_in_prose() {
        let reply = format!("Sure! {OBJECT} Let me know if you need more.");

        let object = extract_json(&reply).unwrap();

        assert_eq!(object["description"], "D");
    }

    #[test]
    fn test_braces_inside_strings_are_ignored() {
        let reply = r#"Result: {"title": "Use {braces} and \"quotes\" }", "x": 1} trailing }"#;

        assert_eq!(
            first_balanced_object(reply),
            Some(r#"{"title": "Use {braces} and \"quotes\" }", "x": 1}"#)
        );
    }

    #[test]
    fn test_no_json_is_parse_error() {
        let err = extract_json("I cannot help with that.").unwrap_err();

        assert!(matches!(err, AiError::JsonParse(_)));
    }

    #[test]
    fn test_unbalanced_is_parse_error() {
        assert!(matches!(
            extract_json(r#"{"title": "T""#),
            Err(AiError::JsonParse(_))
        ));
    }

    #[test]
    fn test_parse_meta() {
        let meta = parse_meta(&extract_json(OBJECT).unwrap()).unwrap();

        assert_eq!(
            meta,
            SeoMeta {
                title: "T".to_owned(),
                description: "D".to_owned(),
                keywords: vec!["a".to_owned(), "b".to_owned()],
                og_title: "OT".to_owned(),
                og_description: "OD".to_owned(),
            }
        );
    }

    #[test]
    fn test_keywords_as_comma_string() {
        let object = extract_json(
            r#"{"title": "T", "description": "D", "keywords": "rust, seo ,, sitemaps", "og_title": "OT", "og_description": "OD"}"#,
        )
        .unwrap();

        assert_eq!(
            parse_meta(&object).unwrap().keywords,
            vec!["rust", "seo", "sitemaps"]
        );
    }

    #[test]
    fn test_missing_fields_are_all_named() {
        let object = extract_json(r#"{"title": "T", "description": "  ", "keywords": []}"#).unwrap();

        let err = parse_meta(&object).unwrap_err();

        match err {
            AiError::MissingFields(fields) => assert_eq!(
                fields,
                vec!["description", "keywords", "og_title", "og_description"]
            ),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_preview_truncates_long_replies() {
        let long = "x".repeat(500);

        assert_eq!(preview(&long).len(), 203);
    }
}
