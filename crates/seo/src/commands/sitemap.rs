//! `seo sitemap` command implementation.
//!
//! Renders one sitemap document the same way the server would, for
//! inspection or static export.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use clap::Args;
use seo_config::{CliSettings, Config};
use seo_server::{load_content, open_cache};
use seo_sitemap::{
    INDEX_FILE, LastModCache, SITEMAP_XSL, STYLESHEET_FILE, SitemapService, SitemapSettings,
};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the sitemap command.
#[derive(Args)]
pub(crate) struct SitemapArgs {
    /// Sitemap file to render, e.g. `post-sitemap2.xml`.
    #[arg(default_value = INDEX_FILE)]
    file: String,

    /// Path to configuration file (default: auto-discover seo.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content export file (overrides config).
    #[arg(long)]
    content: Option<PathBuf>,

    /// Public site URL (overrides config).
    #[arg(long, env = "SEO_SITE_URL")]
    site_url: Option<String>,

    /// Write to a file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl SitemapArgs {
    /// Execute the sitemap command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or content loading fails, or the
    /// file does not address an available sitemap.
    pub(crate) fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            site_url: self.site_url,
            content_export: self.content,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let document = render_file(config, &self.file, version)?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, &document)?;
                output.info(&format!("Wrote {} to {}", self.file, path.display()));
            }
            None => output.document(&document)?,
        }
        Ok(())
    }
}

/// Render `file` against the configured content export.
fn render_file(mut config: Config, file: &str, version: &str) -> Result<String, CliError> {
    if !config.sitemap.enabled {
        return Err(CliError::Validation(
            "Sitemaps are disabled (sitemap.enabled = false)".to_owned(),
        ));
    }
    if file == STYLESHEET_FILE {
        return Ok(SITEMAP_XSL.to_owned());
    }

    let index = load_content(&mut config)?;
    let cache = open_cache(&config, version);
    let ttl = Duration::from_secs(config.cache_resolved.lastmod_ttl_secs);
    let service = SitemapService::new(
        SitemapSettings::from_config(&config),
        Arc::new(index),
        LastModCache::new(cache.as_ref(), ttl),
    );

    tracing::debug!(file, "Rendering sitemap");
    Ok(service.render(file, Utc::now())?)
}
