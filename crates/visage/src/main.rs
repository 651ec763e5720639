//! Visage CLI - face analysis, face rendering, and coloring-page
//! conversion against remote Vision services.
//!
//! # Usage
//!
//! ```bash
//! # Analyze a local image (prints the analysis JSON)
//! visage analyze portrait.jpg
//!
//! # Render the default test image with a mustache overlay
//! visage render
//!
//! # Render an animated gif from a local image
//! visage render portrait.jpg --animated --format gif
//!
//! # Convert an image into a coloring page
//! visage coloring-page portrait.jpg
//!
//! # View configuration
//! visage config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Visage - client for face analysis, rendering, and coloring pages.
#[derive(Parser, Debug)]
#[command(name = "visage")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze an image and print the result as JSON
    Analyze(cli::analyze::AnalyzeArgs),

    /// Analyze and render an image with display options
    Render(cli::render::RenderArgs),

    /// Convert an image into a coloring page
    ColoringPage(cli::coloring::ColoringArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging from config, with CLI verbose override.
    // Note: logging isn't initialized yet, so use eprintln for config warnings.
    let config = match visage_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `visage config path`."
            );
            visage_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Visage v{}", visage_core::VERSION);

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Analyze(args) => cli::analyze::execute(args).await,
        Commands::Render(args) => cli::render::execute(args).await,
        Commands::ColoringPage(args) => cli::coloring::execute(args).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
