//! `logofetch run` – the interactive fetch-and-catalog loop.

use anyhow::Result;
use logofetch_core::config::ToolConfig;
use logofetch_core::fetch::CurlFetcher;
use logofetch_core::session::Session;
use std::path::Path;

use crate::cli::console::ConsoleTerminal;

pub fn run_interactive(cfg: ToolConfig, side_file: &Path) -> Result<()> {
    let fetcher = CurlFetcher::from_config(&cfg);
    let session = Session::new(cfg, side_file);
    let mut terminal = ConsoleTerminal::stdin();

    println!(
        "logofetch: reading output settings from {} (Ctrl-D or Ctrl-C to quit)",
        session.side_file().display()
    );
    tracing::info!("interactive session started, side file {}", side_file.display());
    session.run(&mut terminal, &fetcher)?;
    Ok(())
}
