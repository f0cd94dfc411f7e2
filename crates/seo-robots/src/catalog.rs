//! Built-in crawler catalogs.

/// Crawlers that collect training data for AI models.
pub const AI_BOTS: [&str; 14] = [
    "GPTBot",
    "ChatGPT-User",
    "CCBot",
    "anthropic-ai",
    "Claude-Web",
    "ClaudeBot",
    "Google-Extended",
    "PerplexityBot",
    "Bytespider",
    "Omgilibot",
    "FacebookBot",
    "cohere-ai",
    "Applebot-Extended",
    "Diffbot",
];

/// Aggressive SEO and backlink crawlers.
pub const BAD_BOTS: [&str; 19] = [
    "AhrefsBot",
    "SemrushBot",
    "MJ12bot",
    "DotBot",
    "BLEXBot",
    "PetalBot",
    "MegaIndex",
    "SEOkicks",
    "serpstatbot",
    "DataForSeoBot",
    "Barkrowler",
    "BacklinkCrawler",
    "ZoominfoBot",
    "Seekport",
    "linkdexbot",
    "spbot",
    "MauiBot",
    "Screaming Frog SEO Spider",
    "rogerbot",
];

/// Resolve the bots to block.
///
/// The master toggle selects the whole catalog and ignores `selected`.
/// Otherwise the selection is used in its own order, trimmed, with blanks
/// and repeats dropped.
pub(crate) fn blocked<'a>(block_all: bool, catalog: &[&'a str], selected: &'a [String]) -> Vec<&'a str> {
    if block_all {
        return catalog.to_vec();
    }

    let mut bots: Vec<&str> = Vec::new();
    for bot in selected.iter().map(|s| s.trim()) {
        if !bot.is_empty() && !bots.contains(&bot) {
            bots.push(bot);
        }
    }
    bots
}
