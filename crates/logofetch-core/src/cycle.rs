//! One interactive cycle: identifier → logo file → catalog entry.
//!
//! Every recoverable problem ends the cycle with a [`CycleOutcome`]; the only
//! error returned is operator I/O failing, which means there is nobody left to
//! talk to.

use crate::candidates::build_candidates;
use crate::catalog::{Catalog, CatalogEntry, LoadStatus};
use crate::config::ToolConfig;
use crate::fetch::AssetFetcher;
use crate::naming::base_name;
use crate::output::OutputLayout;
use crate::resolver::{resolve, AttemptOutcome, Resolution, SavedAsset};
use crate::terminal::{Notice, Terminal};
use std::io;

pub const IDENTIFIER_PROMPT: &str = "Store identifier (domain, brand id, ISIN or ticker): ";
pub const NAME_PROMPT: &str = "Store name: ";

/// Everything a cycle needs besides operator I/O and the network.
#[derive(Debug, Clone, Copy)]
pub struct CycleContext<'a> {
    pub tool: &'a ToolConfig,
    pub layout: &'a OutputLayout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    EmptyIdentifier,
    RasterDeclined,
    EmptyName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    Completed {
        entry: CatalogEntry,
        asset: SavedAsset,
        catalog_len: usize,
    },
    Aborted(AbortReason),
    /// None of the candidate URLs produced a saved file.
    NotFound { identifier: String },
    /// Something after the download went wrong (bad CDN URL, catalog I/O).
    Failed(String),
    /// Side file missing or invalid; the operator was asked to fix it.
    ConfigUnavailable(String),
    /// Output directories could not be created.
    OutputUnavailable(String),
}

/// Parses a yes/no answer; `None` means ask again.
pub fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Runs one cycle against an already-prepared output layout.
pub fn run_cycle<T, F>(
    ctx: CycleContext<'_>,
    terminal: &mut T,
    fetcher: &F,
) -> io::Result<CycleOutcome>
where
    T: Terminal + ?Sized,
    F: AssetFetcher + ?Sized,
{
    let identifier = terminal.prompt(IDENTIFIER_PROMPT)?.trim().to_string();
    if identifier.is_empty() {
        terminal.report(Notice::warning("No identifier entered."));
        return Ok(CycleOutcome::Aborted(AbortReason::EmptyIdentifier));
    }

    let candidates = match build_candidates(
        &ctx.tool.cdn_base_url,
        &identifier,
        &ctx.tool.client_id,
    ) {
        Ok(c) => c,
        Err(e) => {
            terminal.report(Notice::error(e.to_string()));
            return Ok(CycleOutcome::Failed(e.to_string()));
        }
    };

    let base = base_name(&identifier);
    terminal.report(Notice::info(format!(
        "Fetching logo for {} ({} candidates)...",
        identifier,
        candidates.len()
    )));
    tracing::info!("resolving identifier={} base_name={}", identifier, base);

    let resolution = resolve(fetcher, &candidates, &ctx.layout.logos, &base);
    for attempt in resolution.attempts() {
        match &attempt.outcome {
            AttemptOutcome::Saved => {}
            AttemptOutcome::Rejected(msg) => {
                terminal.report(Notice::info(format!("  {}: {}", attempt.variant, msg)))
            }
            AttemptOutcome::WriteFailed(msg) => terminal.report(Notice::error(format!(
                "  {}: could not save file: {}",
                attempt.variant, msg
            ))),
        }
    }

    let asset = match resolution {
        Resolution::Saved { asset, .. } => asset,
        Resolution::NotFound { attempts } => {
            terminal.report(Notice::error(format!(
                "No logo downloaded for {} (0 of {} URLs succeeded).",
                identifier,
                attempts.len()
            )));
            return Ok(CycleOutcome::NotFound { identifier });
        }
    };
    terminal.report(Notice::success(format!(
        "Downloaded {} to {}",
        asset.variant,
        asset.path.display()
    )));

    if !asset.is_svg && !confirm_raster(terminal, &asset)? {
        terminal.report(Notice::info("Skipped."));
        return Ok(CycleOutcome::Aborted(AbortReason::RasterDeclined));
    }

    let name = terminal.prompt(NAME_PROMPT)?.trim().to_string();
    if name.is_empty() {
        terminal.report(Notice::warning("No store name entered."));
        return Ok(CycleOutcome::Aborted(AbortReason::EmptyName));
    }

    let catalog_path = &ctx.layout.catalog;
    let (mut catalog, status) = match Catalog::load(catalog_path) {
        Ok(r) => r,
        Err(e) => {
            terminal.report(Notice::error(e.to_string()));
            return Ok(CycleOutcome::Failed(e.to_string()));
        }
    };
    match &status {
        LoadStatus::Discarded(reason) => terminal.report(Notice::warning(format!(
            "Catalog {} was unreadable ({}); starting a new one.",
            catalog_path.display(),
            reason
        ))),
        LoadStatus::Normalized => terminal.report(Notice::info(
            "Catalog held a single object; converted to a list.",
        )),
        LoadStatus::Missing | LoadStatus::Empty | LoadStatus::Loaded(_) => {}
    }

    let entry = CatalogEntry::new(name, identifier);
    let saved = catalog.push(&entry).and_then(|()| catalog.save(catalog_path));
    if let Err(e) = saved {
        terminal.report(Notice::error(e.to_string()));
        return Ok(CycleOutcome::Failed(e.to_string()));
    }

    terminal.report(Notice::success(format!(
        "Added \"{}\" ({}) to {} ({} stores).",
        entry.name,
        entry.source,
        catalog_path.display(),
        catalog.len()
    )));
    tracing::info!(
        "catalog {} now has {} entries",
        catalog_path.display(),
        catalog.len()
    );

    Ok(CycleOutcome::Completed {
        entry,
        asset,
        catalog_len: catalog.len(),
    })
}

/// Asks whether to keep going with a non-SVG download until a clear answer.
fn confirm_raster<T>(terminal: &mut T, asset: &SavedAsset) -> io::Result<bool>
where
    T: Terminal + ?Sized,
{
    let question = format!(
        "The logo is not an SVG ({}). Continue? [y/n]: ",
        asset.content_type.as_deref().unwrap_or("unknown type")
    );
    loop {
        let answer = terminal.prompt(&question)?;
        match parse_yes_no(&answer) {
            Some(yes) => return Ok(yes),
            None => terminal.report(Notice::warning("Please answer y or n.")),
        }
    }
}
