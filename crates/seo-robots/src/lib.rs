//! Virtual `robots.txt` compiler.
//!
//! [`compile`] turns the robots settings into an ordered list of lines; it
//! is deterministic and performs no I/O. Settings are sanitised when the
//! configuration is loaded, so custom rules and extra sitemap URLs are used
//! as-is here.
//!
//! Output order:
//!
//! 1. Non-public site: `User-agent: *` / `Disallow: /`, nothing else
//! 2. One blocking group per AI crawler
//! 3. One blocking group per bad bot
//! 4. The `User-agent: *` group
//! 5. Custom rules
//! 6. `Sitemap:` directives

mod catalog;

use seo_config::Config;

pub use catalog::{AI_BOTS, BAD_BOTS};

/// Unconditional disallows of the `User-agent: *` group.
const FIXED_DISALLOWS: [&str; 6] = [
    "/feed/",
    "/comments/feed/",
    "*/feed/",
    "*/trackback/",
    "/wp-content/plugins/",
    "/wp-content/cache/",
];

/// Static asset patterns that stay crawlable.
const ASSET_ALLOWS: [&str; 11] = [
    "/*.css$", "/*.js$", "/*.jpg$", "/*.jpeg$", "/*.png$", "/*.gif$", "/*.webp$", "/*.svg$",
    "/*.woff$", "/*.woff2$", "/*.ttf$",
];

/// Compile robots directives into lines.
#[must_use]
pub fn compile(config: &Config) -> Vec<String> {
    if !config.site.public {
        return vec!["User-agent: *".to_owned(), "Disallow: /".to_owned()];
    }

    let robots = &config.robots;
    let mut lines = Vec::new();

    let ai = catalog::blocked(robots.block_all_ai_bots, &AI_BOTS, &robots.ai_bots);
    let bad = catalog::blocked(robots.block_all_bad_bots, &BAD_BOTS, &robots.bad_bots);
    for bot in ai.into_iter().chain(bad) {
        lines.push(format!("User-agent: {bot}"));
        lines.push("Disallow: /".to_owned());
        lines.push(String::new());
    }

    lines.push("User-agent: *".to_owned());
    if robots.disallow_admin {
        lines.push("Disallow: /wp-admin/".to_owned());
    }
    if robots.allow_admin_ajax {
        lines.push("Allow: /wp-admin/admin-ajax.php".to_owned());
    }
    if robots.disallow_includes {
        lines.push("Disallow: /wp-includes/".to_owned());
    }
    if robots.disallow_search {
        lines.push("Disallow: /?s=".to_owned());
        lines.push("Disallow: /search/".to_owned());
    }
    lines.extend(FIXED_DISALLOWS.iter().map(|path| format!("Disallow: {path}")));
    lines.extend(ASSET_ALLOWS.iter().map(|path| format!("Allow: {path}")));

    if !robots.custom_rules.trim().is_empty() {
        lines.push(String::new());
        lines.extend(robots.custom_rules.lines().map(str::to_owned));
    }

    let sitemaps = sitemap_urls(config);
    if !sitemaps.is_empty() {
        lines.push(String::new());
        lines.extend(sitemaps.into_iter().map(|url| format!("Sitemap: {url}")));
    }

    lines
}

/// Render `robots.txt` with a trailing newline.
#[must_use]
pub fn render(config: &Config) -> String {
    let mut text = compile(config).join("\n");
    text.push('\n');
    text
}

/// Sitemap URLs to advertise. The fallback applies only when neither the
/// own index nor any extra URL does.
fn sitemap_urls(config: &Config) -> Vec<String> {
    let mut urls = Vec::new();
    if config.sitemap.enabled && config.robots.include_sitemap {
        urls.push(config.sitemap_index_url());
    }
    urls.extend(config.robots.extra_sitemap_urls.iter().cloned());

    if urls.is_empty() && !config.robots.fallback_sitemap.trim().is_empty() {
        tracing::debug!(path = %config.robots.fallback_sitemap, "Advertising fallback sitemap");
        urls.push(config.site.absolute(&config.robots.fallback_sitemap));
    }
    urls
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;

    fn config(toml: &str) -> Config {
        Config::from_toml_str(toml, Path::new("/site")).unwrap()
    }

    const SITE: &str = "[site]\nurl = \"https://example.com\"\n";

    #[test]
    fn test_default_output() {
        let expected = "\
User-agent: *
Disallow: /wp-admin/
Allow: /wp-admin/admin-ajax.php
Disallow: /?s=
Disallow: /search/
Disallow: /feed/
Disallow: /comments/feed/
Disallow: */feed/
Disallow: */trackback/
Disallow: /wp-content/plugins/
Disallow: /wp-content/cache/
Allow: /*.css$
Allow: /*.js$
Allow: /*.jpg$
Allow: /*.jpeg$
Allow: /*.png$
Allow: /*.gif$
Allow: /*.webp$
Allow: /*.svg$
Allow: /*.woff$
Allow: /*.woff2$
Allow: /*.ttf$

Sitemap: https://example.com/sitemap_index.xml
";
        assert_eq!(render(&config(SITE)), expected);
    }

    #[test]
    fn test_non_public_site_is_two_lines() {
        let config = config(&format!(
            "{SITE}public = false\n\
             [robots]\n\
             block_all_ai_bots = true\n\
             block_all_bad_bots = true\n\
             custom_rules = \"Disallow: /private/\"\n\
             extra_sitemaps = \"https://example.com/news.xml\"\n"
        ));

        assert_eq!(compile(&config), vec!["User-agent: *", "Disallow: /"]);
        assert_eq!(render(&config), "User-agent: *\nDisallow: /\n");
    }

    #[test]
    fn test_master_ai_toggle_wins_over_subset() {
        let config = config(&format!(
            "{SITE}[robots]\nblock_all_ai_bots = true\nai_bots = [\"GPTBot\"]\n"
        ));

        let lines = compile(&config);
        let agents: Vec<&str> = lines
            .iter()
            .filter_map(|l| l.strip_prefix("User-agent: "))
            .filter(|a| *a != "*")
            .collect();

        assert_eq!(agents, AI_BOTS.to_vec());
    }

    #[test]
    fn test_bot_groups_precede_wildcard_group() {
        let config = config(&format!(
            "{SITE}[robots]\nai_bots = [\"CCBot\"]\nbad_bots = [\"AhrefsBot\"]\n"
        ));

        let lines = compile(&config);

        assert_eq!(
            lines[..7],
            [
                "User-agent: CCBot",
                "Disallow: /",
                "",
                "User-agent: AhrefsBot",
                "Disallow: /",
                "",
                "User-agent: *",
            ]
        );
    }

    #[test]
    fn test_bad_bot_catalog() {
        let config = config(&format!("{SITE}[robots]\nblock_all_bad_bots = true\n"));

        let text = render(&config);

        for bot in BAD_BOTS {
            assert!(text.contains(&format!("User-agent: {bot}\nDisallow: /\n\n")), "{bot}");
        }
        assert!(!text.contains("GPTBot"));
    }

    #[test]
    fn test_gated_directives_off() {
        let config = config(&format!(
            "{SITE}[robots]\n\
             disallow_admin = false\n\
             allow_admin_ajax = false\n\
             disallow_search = false\n"
        ));

        let text = render(&config);

        assert!(!text.contains("/wp-admin/"));
        assert!(!text.contains("/?s="));
        assert!(text.contains("Disallow: /wp-content/plugins/"));
    }

    #[test]
    fn test_disallow_includes() {
        let config = config(&format!("{SITE}[robots]\ndisallow_includes = true\n"));

        assert!(compile(&config).contains(&"Disallow: /wp-includes/".to_owned()));
    }

    #[test]
    fn test_custom_rules_appended_without_markup() {
        let config = config(&format!(
            "{SITE}[robots]\ncustom_rules = \"<b>Disallow: /private/</b>\\nCrawl-delay: 5\"\n"
        ));

        let text = render(&config);

        assert!(text.contains("Allow: /*.ttf$\n\nDisallow: /private/\nCrawl-delay: 5\n\nSitemap:"));
    }

    #[test]
    fn test_extra_sitemaps_after_own_index() {
        let config = config(&format!(
            "{SITE}[robots]\nextra_sitemaps = \"https://example.com/news.xml\\nnot a url\\n\"\n"
        ));

        let lines = compile(&config);

        assert_eq!(
            lines[lines.len() - 2..],
            [
                "Sitemap: https://example.com/sitemap_index.xml",
                "Sitemap: https://example.com/news.xml",
            ]
        );
    }

    #[test]
    fn test_fallback_only_when_nothing_else() {
        let config = config(&format!("{SITE}[sitemap]\nenabled = false\n"));
        assert_eq!(
            compile(&config).last().map(String::as_str),
            Some("Sitemap: https://example.com/wp-sitemap.xml")
        );

        let config = config_with_extra();
        let text = render(&config);
        assert!(!text.contains("wp-sitemap.xml"));
        assert!(text.contains("Sitemap: https://example.com/news.xml"));
    }

    fn config_with_extra() -> Config {
        config(&format!(
            "{SITE}[robots]\ninclude_sitemap = false\nextra_sitemaps = \"https://example.com/news.xml\"\n"
        ))
    }

    #[test]
    fn test_output_is_deterministic() {
        let config = config(&format!("{SITE}[robots]\nblock_all_ai_bots = true\n"));

        assert_eq!(render(&config), render(&config));
    }
}
