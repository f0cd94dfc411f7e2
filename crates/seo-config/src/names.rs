//! Sitemap type name rules.
//!
//! Post type and taxonomy names become part of sitemap file names
//! (`{type}-sitemap.xml`, `{tax}-taxonomy-sitemap.xml`), so a name is only
//! accepted when its file name parses back to the same section.

/// Post type name that would collide with `author-sitemap.xml`.
const RESERVED_POST_TYPE: &str = "author";

/// A post type ending in this reads back as a taxonomy section.
const TAXONOMY_SUFFIX: &str = "-taxonomy";

/// Whether `name` is non-empty and uses only `[a-z0-9_-]`.
#[must_use]
pub fn is_type_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-')
}

/// Check a post type name, returning the reason it cannot be addressed.
pub(crate) fn check_post_type(name: &str) -> Result<(), String> {
    if !is_type_name(name) {
        return Err(format!("{name:?} must be non-empty and use only a-z, 0-9, _ and -"));
    }
    if name == RESERVED_POST_TYPE {
        return Err(format!("{name:?} is reserved for the author sitemap"));
    }
    if name.ends_with(TAXONOMY_SUFFIX) {
        return Err(format!(
            "{name:?} cannot end with {TAXONOMY_SUFFIX:?}; it would address a taxonomy sitemap"
        ));
    }
    Ok(())
}

/// Check a taxonomy name, returning the reason it cannot be addressed.
pub(crate) fn check_taxonomy(name: &str) -> Result<(), String> {
    if is_type_name(name) {
        Ok(())
    } else {
        Err(format!("{name:?} must be non-empty and use only a-z, 0-9, _ and -"))
    }
}

/// Whether a robots value is a single line without control characters.
pub(crate) fn is_single_line(value: &str) -> bool {
    !value.chars().any(char::is_control)
}
