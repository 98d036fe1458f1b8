//! vitae CLI
//!
//! Builds the portfolio site's JSON data file from markdown content.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for vitae.
#[derive(Parser)]
#[command(
    name = "vitae",
    version,
    about = "Build a portfolio site's JSON data file from markdown content"
)]
struct Cli {
    /// Path to configuration file [default: vitae.toml if present]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Command to run [default: build]
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Write the site data file
    Build {
        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Content root directory
        #[arg(long)]
        content: Option<PathBuf>,
    },
    /// Load and validate content without writing
    Check {
        /// Content root directory
        #[arg(long)]
        content: Option<PathBuf>,
        /// Treat missing sources as errors
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    vitae::init_tracing(cli.verbose);

    let config = cli.config.as_deref();
    let command = cli.command.unwrap_or(Commands::Build {
        output: None,
        content: None,
    });

    match command {
        Commands::Build { output, content } => {
            vitae::cmd::build::run(config, content.as_deref(), output.as_deref())?;
        }
        Commands::Check { content, strict } => {
            vitae::cmd::check::run(config, content.as_deref(), strict)?;
        }
    }

    Ok(())
}
