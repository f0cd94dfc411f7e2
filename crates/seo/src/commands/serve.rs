//! `seo serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use seo_config::{CliSettings, Config};
use seo_server::run_server;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover seo.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Public site URL (overrides config).
    #[arg(long, env = "SEO_SITE_URL")]
    site_url: Option<String>,

    /// Content export file (overrides config).
    #[arg(long)]
    content: Option<PathBuf>,

    /// Enable verbose output (request and ping logs).
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable the file cache (default: enabled).
    #[arg(long)]
    cache: Option<bool>,

    /// Disable the file cache.
    #[arg(long, conflicts_with = "cache")]
    no_cache: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            cache_enabled: self.resolve_cache_enabled(),
            host: self.host,
            port: self.port,
            site_url: self.site_url,
            content_export: self.content,
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.field("Site", &config.site.url);
        output.field(
            "Listening",
            &format!("{}:{}", config.server.host, config.server.port),
        );
        output.field("Content export", &config.content_resolved.export.display());

        if config.cache_resolved.enabled {
            output.field("Cache directory", &config.cache_resolved.dir.display());
        } else {
            output.field("Cache", &"in-memory only");
        }

        if config.sitemap.enabled {
            output.field("Sitemap index", &config.sitemap_index_url());
        } else {
            output.field("Sitemaps", &"disabled");
        }

        if !config.robots.enabled {
            output.field("Virtual robots.txt", &"disabled");
        }

        if !config.site.public {
            output.warning("Site is not public: robots.txt disallows all crawling");
        }

        run_server(config, version)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }

    /// Resolve `cache_enabled` from --cache/--no-cache flags.
    fn resolve_cache_enabled(&self) -> Option<bool> {
        self.no_cache.then_some(false).or(self.cache)
    }
}
