//! Letterpress CLI library
//!
//! This library contains all the CLI logic for letterpress, making it
//! reusable for testing and integration with other tools.

pub mod cmd;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Letterpress - an HTML email template builder
#[derive(Parser)]
#[command(name = "letterpress")]
#[command(about = "Build HTML emails from templates")]
#[command(version)]
#[command(long_about = "Build HTML emails from templates

Letterpress compiles a directory of Jinja2-style templates into
email-ready HTML: front matter per template, shared partials, and a
post-processing chain tuned for email clients.

Features:
  • Jinja2-like template syntax with partials
  • Per-template front matter overrides
  • Comment stripping, whitespace collapsing, URL rewriting
  • Lifecycle hooks for programmatic builds")]
pub struct Cli {
    /// Path to the config file
    #[arg(
        long,
        env = "LETTERPRESS_CONFIG",
        value_name = "FILE",
        default_value = "letterpress.toml"
    )]
    pub config: PathBuf,

    /// Project root directory the configured paths resolve against
    #[arg(long, env = "LETTERPRESS_ROOT", value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Enable verbose output (shows DEBUG level logs)
    #[arg(short, long)]
    pub verbose: bool,

    /// Write logs to a file (useful for debugging)
    #[arg(long, env = "LETTERPRESS_LOG_FILE", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for the letterpress CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Build all templates into the output directory
    Build(cmd::build::BuildCommand),

    /// Scaffold a new letterpress project
    Init(cmd::init::InitCommand),

    /// Remove the output directory
    Clean,
}

/// Main entry point for the CLI logic
///
/// # Errors
///
/// Returns an error if:
/// - Logging initialization fails
/// - Configuration loading fails
/// - Command execution fails
pub fn run(cli: Cli) -> Result<()> {
    letterpress_config::logging::init(cli.verbose, cli.log_file.as_deref())?;

    // Init runs before any config exists; everything else loads it first.
    if let Commands::Init(init_cmd) = &cli.command {
        return init_cmd.execute(&cli.root);
    }

    let config_path = if cli.config.is_absolute() {
        cli.config.clone()
    } else {
        cli.root.join(&cli.config)
    };
    let config = letterpress_config::Config::load_or_default(&config_path)?;

    match cli.command {
        Commands::Init(_) => unreachable!("Init command already handled above"),
        Commands::Build(build_cmd) => build_cmd.execute(&cli.root, config),
        Commands::Clean => cmd::clean::run(&cli.root, &config),
    }
}
