//! Save-time sanitisation of free-text robots settings.
//!
//! These run once when settings are loaded, never while rendering, so the
//! robots compiler can emit stored values verbatim.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

static MARKUP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Remove HTML/XML tags from custom robots rules and trim trailing space on
/// every line. Blank leading and trailing lines are dropped.
pub(crate) fn strip_markup(rules: &str) -> String {
    let stripped = MARKUP_RE.replace_all(rules, "");
    let lines: Vec<&str> = stripped.lines().map(str::trim_end).collect();

    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());
    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}

/// Split extra sitemap URLs, one per non-blank line.
///
/// Returns `(valid, dropped)`. A URL is valid when it parses, uses `http` or
/// `https`, and has a host.
pub(crate) fn split_sitemap_urls(raw: &str) -> (Vec<String>, Vec<String>) {
    let mut valid = Vec::new();
    let mut dropped = Vec::new();

    for line in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if is_sitemap_url(line) {
            if !valid.iter().any(|v| v == line) {
                valid.push(line.to_owned());
            }
        } else {
            dropped.push(line.to_owned());
        }
    }

    (valid, dropped)
}

fn is_sitemap_url(candidate: &str) -> bool {
    Url::parse(candidate)
        .is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
}
