//! Image discovery for `<image:image>` entries.

use std::sync::LazyLock;

use regex::Regex;
use seo_content::Entity;
use url::Url;

/// Maximum image entries per URL allowed by the image sitemap extension.
pub const MAX_IMAGES_PER_URL: usize = 1000;

static IMG_SRC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<img\b[^>]*?\ssrc\s*=\s*["']([^"']+)["']"#).unwrap());

/// Collect image URLs for an entity.
///
/// The featured image comes first and is kept whatever its origin. Images
/// found in the content are kept only when they are root-relative or live on
/// the same host as `site_url`. Root-relative and protocol-relative URLs are
/// made absolute. Duplicates are dropped and the list is capped at
/// [`MAX_IMAGES_PER_URL`].
pub(crate) fn collect_images(entity: &Entity, site_url: &str) -> Vec<String> {
    let Ok(site) = Url::parse(site_url) else {
        return Vec::new();
    };

    let featured = entity
        .featured_image
        .as_deref()
        .and_then(|src| absolutize(src, &site));

    let inline = entity
        .content
        .as_deref()
        .into_iter()
        .flat_map(|html| IMG_SRC_RE.captures_iter(html))
        .filter_map(|caps| caps.get(1))
        .filter_map(|src| absolutize(src.as_str().trim(), &site))
        .filter(|url| same_host(url, &site));

    let mut images: Vec<String> = Vec::new();
    for url in featured.into_iter().chain(inline) {
        if images.len() == MAX_IMAGES_PER_URL {
            break;
        }
        if !images.contains(&url) {
            images.push(url);
        }
    }
    images
}

/// Resolve an image reference against the site root. `data:` URIs and
/// unparseable references are discarded.
fn absolutize(src: &str, site: &Url) -> Option<String> {
    if src.is_empty() || src.starts_with("data:") {
        return None;
    }
    if let Ok(url) = Url::parse(src) {
        return matches!(url.scheme(), "http" | "https").then(|| url.to_string());
    }
    if src.starts_with('/') {
        return site.join(src).ok().map(String::from);
    }
    // Page-relative references depend on the post URL; skip them.
    None
}

fn same_host(candidate: &str, site: &Url) -> bool {
    Url::parse(candidate).is_ok_and(|url| {
        url.host_str()
            .zip(site.host_str())
            .is_some_and(|(a, b)| a.eq_ignore_ascii_case(b))
    })
}
