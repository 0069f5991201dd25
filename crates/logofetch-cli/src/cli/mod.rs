//! CLI for the logofetch store-logo tool.

mod commands;
mod console;

use anyhow::Result;
use clap::{Parser, Subcommand};
use logofetch_core::config;
use logofetch_core::output::DEFAULT_SIDE_FILE;
use std::path::PathBuf;

use commands::{run_interactive, run_paths, run_urls};

/// Top-level CLI for logofetch.
#[derive(Debug, Parser)]
#[command(name = "logofetch")]
#[command(about = "Fetch store logos from a brand CDN and record them in a JSON catalog", long_about = None)]
pub struct Cli {
    /// JSON side file holding `outputPath`; re-read before every cycle.
    #[arg(long, global = true, value_name = "PATH", default_value = DEFAULT_SIDE_FILE)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Prompt for identifiers in a loop, download logos and append catalog entries (default).
    Run,

    /// Print the candidate URLs and file base name for an identifier without fetching.
    Urls {
        /// Domain, brand id, ISIN or ticker.
        identifier: String,
    },

    /// Show where settings, logs, logos and the catalog live.
    Paths,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let (cfg, problem) = config::load_or_default();
        if let Some(e) = problem {
            eprintln!("WARNING: {:#}; continuing with default settings.", e);
        }
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command.unwrap_or(CliCommand::Run) {
            CliCommand::Run => run_interactive(cfg, &cli.config)?,
            CliCommand::Urls { identifier } => run_urls(&cfg, &identifier)?,
            CliCommand::Paths => run_paths(&cfg, &cli.config)?,
        }

        Ok(())
    }
}
