//! `seo generate-meta` command implementation.

use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use seo_ai::{MetaGenerator, MetaRequest};
use seo_config::{AiConfig, Config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the generate-meta command.
#[derive(Args)]
pub(crate) struct GenerateMetaArgs {
    /// Page body file (HTML or text). Reads stdin when omitted or `-`.
    input: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover seo.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Current page title.
    #[arg(short, long)]
    title: Option<String>,

    /// Keyword the page should rank for.
    #[arg(short = 'k', long)]
    focus_keyword: Option<String>,
}

impl GenerateMetaArgs {
    /// Execute the generate-meta command.
    ///
    /// # Errors
    ///
    /// Returns an error if no AI provider is configured, the input cannot
    /// be read, or the provider call fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), None)?;
        let ai = ai_settings(&config)?;
        let content = self.read_content()?;

        let generator = MetaGenerator::from_config(ai);
        output.info(&format!("Generating metadata with {}", generator.model()));

        let meta = generator.generate(&MetaRequest {
            title: self.title,
            content,
            focus_keyword: self.focus_keyword,
        })?;

        let json = serde_json::to_string_pretty(&meta)
            .map_err(|e| CliError::Validation(format!("Failed to encode metadata: {e}")))?;
        output.document(&format!("{json}\n"))?;
        Ok(())
    }

    fn read_content(&self) -> Result<String, CliError> {
        match self.input.as_deref() {
            Some(path) if path.as_os_str() != "-" => Ok(std::fs::read_to_string(path)?),
            _ => {
                let mut content = String::new();
                std::io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }
}

fn ai_settings(config: &Config) -> Result<&AiConfig, CliError> {
    config.ai.as_ref().ok_or_else(|| {
        CliError::Validation(
            "No AI provider configured. Add an [ai] section with provider and api_key".to_owned(),
        )
    })
}
