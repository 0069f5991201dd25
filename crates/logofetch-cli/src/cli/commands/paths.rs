//! `logofetch paths` – show settings, log and output locations.

use anyhow::Result;
use logofetch_core::config::{self, ToolConfig};
use logofetch_core::logging;
use logofetch_core::output::OutputConfig;
use std::path::Path;

pub fn run_paths(cfg: &ToolConfig, side_file: &Path) -> Result<()> {
    println!("settings:  {}", config::config_path()?.display());
    println!("log:       {}", logging::log_file_path()?.display());
    println!("side file: {}", side_file.display());
    match OutputConfig::load(side_file) {
        Ok(output) => {
            let layout = output.layout(&cfg.catalog_file_name);
            println!("logos:     {}", layout.logos.display());
            println!("catalog:   {}", layout.catalog.display());
        }
        Err(e) => println!("output:    unavailable ({})", e),
    }
    Ok(())
}
