//! Locrest CLI - Command-line interface for .locres translation tools

pub mod banner;
pub mod commands;
pub mod progress;
pub mod prompt;

use std::process::ExitCode;

use clap::Parser;
use commands::Commands;
use console::style;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "locrest", version)]
#[command(
    about = "Community tool for extracting and reinserting dialogues/text from Unreal Engine locres files",
    long_about = None
)]
struct Cli {
    /// Suppress the banner and progress output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Skip the startup banner
    #[arg(long, global = true)]
    no_banner: bool,

    #[command(subcommand)]
    command: Commands,
}

/// State shared by every command
pub struct CliContext {
    /// Loaded user configuration
    pub config: Config,
    /// Suppress progress output
    pub quiet: bool,
}

/// Run the Locrest CLI
pub fn run_cli() -> anyhow::Result<()> {
    // Setup logging; RUST_LOG overrides the quiet default
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if !cli.quiet && !cli.no_banner {
        banner::print_banner();
    }

    let context = CliContext {
        config: Config::load()?,
        quiet: cli.quiet,
    };
    cli.command.execute(&context)?;

    Ok(())
}

/// Run the CLI and map the outcome to a process exit code
///
/// Failures are printed to stderr and exit with status 1.
pub fn main_exit_code() -> ExitCode {
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", style("Error:").red().bold());
            ExitCode::from(1)
        }
    }
}
