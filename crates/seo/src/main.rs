//! SEO CLI - Sitemap and robots service.
//!
//! Provides commands for:
//! - `serve`: Start the sitemap and robots server
//! - `robots`: Print the compiled robots.txt
//! - `sitemap`: Render one sitemap file (index, section page or stylesheet)
//! - `generate-meta`: Generate page metadata with the configured AI provider

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{GenerateMetaArgs, RobotsArgs, ServeArgs, SitemapArgs};
use error::CliError;
use output::Output;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// SEO - Sitemap and robots service.
#[derive(Parser)]
#[command(name = "seo", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the sitemap and robots server.
    Serve(ServeArgs),
    /// Print the compiled robots.txt.
    Robots(RobotsArgs),
    /// Render a sitemap file to stdout.
    Sitemap(SitemapArgs),
    /// Generate title, description and keywords for a page.
    GenerateMeta(GenerateMetaArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let verbose = matches!(&cli.command, Commands::Serve(args) if args.verbose);
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli.command) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Serve(args) => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(args.execute(VERSION))
        }
        Commands::Robots(args) => args.execute(),
        Commands::Sitemap(args) => args.execute(VERSION),
        Commands::GenerateMeta(args) => args.execute(),
    }
}
