//! Sitemap page arithmetic.
//!
//! Pages are 1-based. A section with no entities has zero pages and is left
//! out of the sitemap index.

/// Number of pages needed for `count` entities at `page_size` per page.
///
/// Returns 0 when `count` is 0. A `page_size` of 0 is treated as 1 so the
/// function is total; configuration validation rejects 0 before it gets here.
#[must_use]
pub fn page_count(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// Offset of the first entity on a 1-based `page`.
#[must_use]
pub fn page_offset(page: usize, page_size: usize) -> usize {
    page.saturating_sub(1).saturating_mul(page_size)
}
