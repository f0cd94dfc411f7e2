//! Configuration management for the SEO sitemap service.
//!
//! Parses `seo.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! The resulting [`Config`] is the explicit settings object handed by
//! reference to the sitemap renderer, the robots compiler and the ping
//! notifier. Nothing reads settings from ambient global state.
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `site.url`
//! - `ai.api_key`
//!
//! ## Load-time Sanitisation
//!
//! Free-text robots settings are cleaned once, when the file is loaded:
//! markup is stripped from `robots.custom_rules`, and `robots.extra_sitemaps`
//! is split into one URL per non-blank line with malformed URLs dropped
//! (each drop is logged as a warning).

mod expand;
mod names;
mod sanitize;

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use names::is_type_name;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override public site URL.
    pub site_url: Option<String>,
    /// Override content export path.
    pub content_export: Option<PathBuf>,
    /// Override cache enabled flag.
    pub cache_enabled: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "seo.toml";

/// Largest page size accepted by the sitemap protocol.
pub const MAX_PAGE_SIZE: usize = 50_000;

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Public site configuration.
    pub site: SiteConfig,
    /// Content source configuration (paths are relative strings from TOML).
    content: ContentConfigRaw,
    /// Cache configuration (paths are relative strings from TOML).
    cache: CacheConfigRaw,
    /// Sitemap generation settings.
    pub sitemap: SitemapConfig,
    /// Robots.txt settings.
    pub robots: RobotsConfig,
    /// Search engine ping settings.
    pub ping: PingConfig,
    /// AI metadata generation (optional section).
    pub ai: Option<AiConfig>,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Resolved cache configuration (set after loading).
    #[serde(skip)]
    pub cache_resolved: CacheConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
        }
    }
}

/// Public site configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Public base URL, without trailing slash after loading.
    pub url: String,
    /// Whether search engines may index the site at all.
    pub public: bool,
    /// Id of the `page` entity used as the homepage.
    pub home_id: Option<u64>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:7979".to_owned(),
            public: true,
            home_id: None,
        }
    }
}

impl SiteConfig {
    /// Absolute URL for a root-relative path.
    #[must_use]
    pub fn absolute(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Raw content configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    export: Option<String>,
}

/// Resolved content source configuration.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Content export file (JSON or YAML).
    pub export: PathBuf,
}

/// Raw cache configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CacheConfigRaw {
    enabled: Option<bool>,
    dir: Option<String>,
    lastmod_ttl_secs: Option<u64>,
}

/// Resolved cache configuration.
#[derive(Debug)]
pub struct CacheConfig {
    /// Whether the file cache is used (otherwise an in-memory cache).
    pub enabled: bool,
    /// Cache directory.
    pub dir: PathBuf,
    /// Time-to-live of memoized section `lastmod` values.
    pub lastmod_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: PathBuf::from(".seo/cache"),
            lastmod_ttl_secs: 3600,
        }
    }
}

/// Sitemap generation settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Serve sitemaps at all.
    pub enabled: bool,
    /// Maximum URLs per sitemap page.
    pub page_size: usize,
    /// Post types included in the sitemap (allow-list).
    ///
    /// Names use `[a-z0-9_-]`; `author` and names ending in `-taxonomy` are
    /// rejected because their file names would address another section.
    pub post_types: Vec<String>,
    /// Taxonomies included in the sitemap.
    ///
    /// `None` means "never configured"; [`Config::seed_taxonomies`] fills it
    /// once. After that it is a strict allow-list.
    pub taxonomies: Option<Vec<String>>,
    /// Include the author sitemap.
    pub include_authors: bool,
    /// Include `<image:image>` entries in post-type pages.
    pub include_images: bool,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            page_size: 1000,
            post_types: vec!["post".to_owned(), "page".to_owned()],
            taxonomies: None,
            include_authors: true,
            include_images: true,
        }
    }
}

/// Robots.txt settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RobotsConfig {
    /// Serve the virtual robots.txt.
    pub enabled: bool,
    /// Block every crawler in the built-in AI bot catalog.
    pub block_all_ai_bots: bool,
    /// AI bots to block when `block_all_ai_bots` is off.
    pub ai_bots: Vec<String>,
    /// Block every crawler in the built-in bad bot catalog.
    pub block_all_bad_bots: bool,
    /// Bad bots to block when `block_all_bad_bots` is off.
    pub bad_bots: Vec<String>,
    /// `Disallow: /wp-admin/`.
    pub disallow_admin: bool,
    /// `Allow: /wp-admin/admin-ajax.php`.
    pub allow_admin_ajax: bool,
    /// `Disallow: /wp-includes/`.
    pub disallow_includes: bool,
    /// Disallow search result paths.
    pub disallow_search: bool,
    /// Free-text rules appended verbatim (markup stripped at load).
    pub custom_rules: String,
    /// Extra sitemap URLs, one per line, as written in the file.
    pub extra_sitemaps: String,
    /// Advertise this service's sitemap index.
    pub include_sitemap: bool,
    /// Path advertised when no other sitemap applies.
    pub fallback_sitemap: String,

    /// Validated extra sitemap URLs (set after loading).
    #[serde(skip)]
    pub extra_sitemap_urls: Vec<String>,
}

impl Default for RobotsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            block_all_ai_bots: false,
            ai_bots: Vec::new(),
            block_all_bad_bots: false,
            bad_bots: Vec::new(),
            disallow_admin: true,
            allow_admin_ajax: true,
            disallow_includes: false,
            disallow_search: true,
            custom_rules: String::new(),
            extra_sitemaps: String::new(),
            include_sitemap: true,
            fallback_sitemap: "wp-sitemap.xml".to_owned(),
            extra_sitemap_urls: Vec::new(),
        }
    }
}

/// Search engine ping settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PingConfig {
    /// Ping search engines when qualifying content is published.
    pub on_publish: bool,
    /// Timeout of each outbound ping request.
    pub timeout_secs: u64,
    /// Minimum interval between pings.
    pub interval_secs: u64,
}

impl Default for PingConfig {
    fn default() -> Self {
        Self {
            on_publish: false,
            timeout_secs: 5,
            interval_secs: 3600,
        }
    }
}

/// AI provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    /// OpenAI chat completions API.
    #[default]
    OpenAi,
    /// Anthropic messages API.
    Anthropic,
}

/// AI metadata generation settings.
#[derive(Debug, Deserialize)]
pub struct AiConfig {
    /// Provider to call.
    #[serde(default)]
    pub provider: AiProvider,
    /// API key (may be empty; requests then fail with `NoApiKey`).
    #[serde(default)]
    pub api_key: String,
    /// Model override.
    #[serde(default)]
    pub model: Option<String>,
    /// Request timeout.
    #[serde(default = "default_ai_timeout")]
    pub timeout_secs: u64,
}

fn default_ai_timeout() -> u64 {
    30
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`ai.api_key`").
        field: String,
        /// Error message (e.g., "${`OPENAI_API_KEY`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `seo.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Parse configuration from a TOML string, resolving paths against
    /// `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, env expansion, or validation fails.
    pub fn from_toml_str(content: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;

        config.expand_env_vars()?;
        config.resolve_paths(base_dir);
        config.sanitize();
        config.validate()?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(site_url) = &settings.site_url {
            self.site.url = site_url.trim_end_matches('/').to_owned();
        }
        if let Some(export) = &settings.content_export {
            self.content_resolved.export.clone_from(export);
        }
        if let Some(cache_enabled) = settings.cache_enabled {
            self.cache_resolved.enabled = cache_enabled;
        }
    }

    /// Seed the taxonomy allow-list from the registered taxonomies.
    ///
    /// One-time migration for configurations that never listed taxonomies.
    /// Returns `true` if the list was seeded, `false` if it was already set
    /// (in which case it is left untouched, even if empty).
    ///
    /// Registered names that cannot form a sitemap file name are skipped.
    pub fn seed_taxonomies(&mut self, registered: &[String]) -> bool {
        if self.sitemap.taxonomies.is_some() {
            return false;
        }
        let mut seeded = Vec::with_capacity(registered.len());
        for taxonomy in registered {
            match names::check_taxonomy(taxonomy) {
                Ok(()) => seeded.push(taxonomy.clone()),
                Err(reason) => {
                    tracing::warn!(%reason, "Skipping taxonomy when seeding sitemap allow-list");
                }
            }
        }
        tracing::info!(
            taxonomies = ?seeded,
            "Seeding sitemap taxonomy allow-list from registered taxonomies"
        );
        self.sitemap.taxonomies = Some(seeded);
        true
    }

    /// Absolute URL of the sitemap index.
    #[must_use]
    pub fn sitemap_index_url(&self) -> String {
        self.site.absolute("sitemap_index.xml")
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            site: SiteConfig::default(),
            content: ContentConfigRaw::default(),
            cache: CacheConfigRaw::default(),
            sitemap: SitemapConfig::default(),
            robots: RobotsConfig::default(),
            ping: PingConfig::default(),
            ai: None,
            content_resolved: ContentConfig {
                export: base.join("content.json"),
            },
            cache_resolved: CacheConfig {
                dir: base.join(".seo/cache"),
                ..CacheConfig::default()
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));

        let mut config = Self::from_toml_str(&content, config_dir)?;
        config.config_path = Some(path.to_path_buf());

        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_site()?;
        self.validate_sitemap()?;
        self.validate_robots()?;
        self.validate_ping()?;
        Ok(())
    }

    /// Validate server configuration.
    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate site configuration.
    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.url, "site.url")?;
        require_http_url(&self.site.url, "site.url")
    }

    /// Validate sitemap and cache timing configuration.
    fn validate_sitemap(&self) -> Result<(), ConfigError> {
        let page_size = self.sitemap.page_size;
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::Validation(format!(
                "sitemap.page_size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }

        if self.cache_resolved.lastmod_ttl_secs == 0 {
            return Err(ConfigError::Validation(
                "cache.lastmod_ttl_secs must be greater than 0".to_owned(),
            ));
        }

        for post_type in &self.sitemap.post_types {
            names::check_post_type(post_type).map_err(|reason| {
                ConfigError::Validation(format!("sitemap.post_types: {reason}"))
            })?;
        }
        for taxonomy in self.sitemap.taxonomies.iter().flatten() {
            names::check_taxonomy(taxonomy).map_err(|reason| {
                ConfigError::Validation(format!("sitemap.taxonomies: {reason}"))
            })?;
        }

        Ok(())
    }

    /// Validate robots.txt settings that are written verbatim as directives.
    fn validate_robots(&self) -> Result<(), ConfigError> {
        let bots = [
            ("robots.ai_bots", &self.robots.ai_bots),
            ("robots.bad_bots", &self.robots.bad_bots),
        ];
        for (field, list) in bots {
            if let Some(name) = list.iter().find(|name| !names::is_single_line(name)) {
                return Err(ConfigError::Validation(format!(
                    "{field}: {name:?} must not contain control characters"
                )));
            }
        }

        if !names::is_single_line(&self.robots.fallback_sitemap) {
            return Err(ConfigError::Validation(
                "robots.fallback_sitemap must not contain control characters".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate search engine ping timing.
    fn validate_ping(&self) -> Result<(), ConfigError> {
        if self.ping.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "ping.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        if self.ping.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "ping.interval_secs must be greater than 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;
        self.site.url = expand::expand_env(&self.site.url, "site.url")?;

        if let Some(ref mut ai) = self.ai {
            ai.api_key = expand::expand_env(&ai.api_key, "ai.api_key")?;
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.content_resolved = ContentConfig {
            export: resolve(self.content.export.as_deref(), "content.json"),
        };

        self.cache_resolved = CacheConfig {
            enabled: self.cache.enabled.unwrap_or(true),
            dir: resolve(self.cache.dir.as_deref(), ".seo/cache"),
            lastmod_ttl_secs: self.cache.lastmod_ttl_secs.unwrap_or(3600),
        };
    }

    /// Clean free-text settings once, at load time.
    fn sanitize(&mut self) {
        self.site.url = self.site.url.trim_end_matches('/').to_owned();
        self.robots.custom_rules = sanitize::strip_markup(&self.robots.custom_rules);

        let (valid, dropped) = sanitize::split_sitemap_urls(&self.robots.extra_sitemaps);
        for url in &dropped {
            tracing::warn!(url = %url, "Dropping malformed extra sitemap URL");
        }
        self.robots.extra_sitemap_urls = valid;
    }
}
