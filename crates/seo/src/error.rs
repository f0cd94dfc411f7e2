//! CLI error types.

use seo_ai::AiError;
use seo_config::ConfigError;
use seo_content::ContentError;
use seo_sitemap::SitemapError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Content(#[from] ContentError),

    #[error("{0}")]
    Sitemap(#[from] SitemapError),

    #[error("{0}")]
    Ai(#[from] AiError),

    #[error("{0}")]
    Server(String),

    #[error("{0}")]
    Validation(String),
}
