//! `logofetch urls <identifier>` – show what would be requested.

use anyhow::Result;
use logofetch_core::candidates::build_candidates;
use logofetch_core::config::ToolConfig;
use logofetch_core::naming::base_name;

pub fn run_urls(cfg: &ToolConfig, identifier: &str) -> Result<()> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        anyhow::bail!("identifier must not be empty");
    }
    let candidates = build_candidates(&cfg.cdn_base_url, identifier, &cfg.client_id)?;
    println!("base name: {}", base_name(identifier));
    for (i, c) in candidates.iter().enumerate() {
        println!("{}. {:<13} {}", i + 1, c.variant.label(), c.url);
    }
    Ok(())
}
