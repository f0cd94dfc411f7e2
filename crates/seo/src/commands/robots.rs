//! `seo robots` command implementation.

use std::path::PathBuf;

use clap::Args;
use seo_config::{CliSettings, Config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the robots command.
#[derive(Args)]
pub(crate) struct RobotsArgs {
    /// Path to configuration file (default: auto-discover seo.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Public site URL (overrides config).
    #[arg(long, env = "SEO_SITE_URL")]
    site_url: Option<String>,
}

impl RobotsArgs {
    /// Execute the robots command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or stdout is closed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            site_url: self.site_url,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        if !config.robots.enabled {
            output.warning("robots.enabled is false: the server does not serve this file");
        }

        output.document(&seo_robots::render(&config))?;
        Ok(())
    }
}
