//! Outer interactive loop.
//!
//! Each iteration re-reads the side file, prepares the output directories and
//! runs one [`cycle`](crate::cycle). Problems are reported and the loop goes
//! on; it ends only when the operator's input does.

use crate::config::ToolConfig;
use crate::cycle::{run_cycle, CycleContext, CycleOutcome};
use crate::fetch::AssetFetcher;
use crate::output::OutputConfig;
use crate::terminal::{Notice, Terminal};
use std::io;
use std::path::{Path, PathBuf};

pub const RETRY_PROMPT: &str = "Press Enter to retry...";

#[derive(Debug, Clone)]
pub struct Session {
    tool: ToolConfig,
    side_file: PathBuf,
}

impl Session {
    pub fn new(tool: ToolConfig, side_file: impl Into<PathBuf>) -> Self {
        Self {
            tool,
            side_file: side_file.into(),
        }
    }

    pub fn side_file(&self) -> &Path {
        &self.side_file
    }

    /// Loads configuration, prepares directories and runs one cycle.
    pub fn run_once<T, F>(&self, terminal: &mut T, fetcher: &F) -> io::Result<CycleOutcome>
    where
        T: Terminal + ?Sized,
        F: AssetFetcher + ?Sized,
    {
        let output = match OutputConfig::load(&self.side_file) {
            Ok(o) => o,
            Err(e) => {
                tracing::warn!("config unavailable: {}", e);
                terminal.report(Notice::error(e.to_string()));
                terminal.report(Notice::info(format!(
                    "Expected a JSON object like {{ \"outputPath\": \"/path/to/output\" }} in {}.",
                    self.side_file.display()
                )));
                terminal.prompt(RETRY_PROMPT)?;
                return Ok(CycleOutcome::ConfigUnavailable(e.to_string()));
            }
        };

        let layout = output.layout(&self.tool.catalog_file_name);
        if let Err(e) = layout.ensure() {
            tracing::warn!("output unavailable: {}", e);
            terminal.report(Notice::error(e.to_string()));
            terminal.prompt(RETRY_PROMPT)?;
            return Ok(CycleOutcome::OutputUnavailable(e.to_string()));
        }

        run_cycle(
            CycleContext {
                tool: &self.tool,
                layout: &layout,
            },
            terminal,
            fetcher,
        )
    }

    /// Runs cycles until the terminal reaches end of input.
    ///
    /// Returns `Ok(())` on end of input. An answer that cannot be decoded is
    /// reported and the cycle starts over; other terminal I/O errors are returned.
    pub fn run<T, F>(&self, terminal: &mut T, fetcher: &F) -> io::Result<()>
    where
        T: Terminal + ?Sized,
        F: AssetFetcher + ?Sized,
    {
        loop {
            match self.run_once(terminal, fetcher) {
                Ok(outcome) => tracing::debug!("cycle finished: {:?}", outcome),
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    tracing::info!("input closed, leaving the loop");
                    terminal.report(Notice::info("Input closed; exiting."));
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    tracing::warn!("unreadable answer: {}", e);
                    terminal.report(Notice::error(format!("Could not read that answer: {}", e)));
                }
                Err(e) => return Err(e),
            }
        }
    }
}
