//! Resolve an identifier to a saved logo file.
//!
//! Candidates are tried strictly in order and the first response that is both
//! successful and written to disk wins; later candidates are never requested.

use crate::candidates::{Candidate, Variant};
use crate::fetch::AssetFetcher;
use crate::naming::extension_for;
use std::fs;
use std::path::{Path, PathBuf};

/// What happened to one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Saved,
    /// Transport failure or non-2xx status.
    Rejected(String),
    /// Response was fine but the file could not be written.
    WriteFailed(String),
}

#[derive(Debug, Clone)]
pub struct Attempt {
    pub variant: Variant,
    pub url: String,
    pub status_code: u32,
    pub outcome: AttemptOutcome,
}

/// The downloaded asset as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedAsset {
    pub variant: Variant,
    pub path: PathBuf,
    pub is_svg: bool,
    pub content_type: Option<String>,
    pub size: usize,
}

#[derive(Debug, Clone)]
pub enum Resolution {
    Saved {
        asset: SavedAsset,
        attempts: Vec<Attempt>,
    },
    NotFound {
        attempts: Vec<Attempt>,
    },
}

impl Resolution {
    pub fn attempts(&self) -> &[Attempt] {
        match self {
            Resolution::Saved { attempts, .. } | Resolution::NotFound { attempts } => attempts,
        }
    }

    pub fn asset(&self) -> Option<&SavedAsset> {
        match self {
            Resolution::Saved { asset, .. } => Some(asset),
            Resolution::NotFound { .. } => None,
        }
    }
}

/// Tries each candidate and saves the first success as `<logos_dir>/<base_name><ext>`.
pub fn resolve<F>(
    fetcher: &F,
    candidates: &[Candidate],
    logos_dir: &Path,
    base_name: &str,
) -> Resolution
where
    F: AssetFetcher + ?Sized,
{
    let mut attempts = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        tracing::debug!("trying {} at {}", candidate.variant, candidate.url);
        let result = fetcher.fetch(&candidate.url);
        let bytes = match result.bytes {
            Some(bytes) if result.success => bytes,
            _ => {
                tracing::info!(
                    "{} not available: {}",
                    candidate.variant,
                    result.message
                );
                attempts.push(Attempt {
                    variant: candidate.variant,
                    url: candidate.url.clone(),
                    status_code: result.status_code,
                    outcome: AttemptOutcome::Rejected(result.message),
                });
                continue;
            }
        };

        let ext = extension_for(result.is_svg, result.content_type.as_deref());
        let path = logos_dir.join(format!("{}{}", base_name, ext));
        if let Err(e) = fs::write(&path, &bytes) {
            tracing::warn!("writing {} failed: {}", path.display(), e);
            attempts.push(Attempt {
                variant: candidate.variant,
                url: candidate.url.clone(),
                status_code: result.status_code,
                outcome: AttemptOutcome::WriteFailed(format!("{}: {}", path.display(), e)),
            });
            continue;
        }

        tracing::info!(
            "saved {} as {} ({} bytes)",
            candidate.variant,
            path.display(),
            bytes.len()
        );
        attempts.push(Attempt {
            variant: candidate.variant,
            url: candidate.url.clone(),
            status_code: result.status_code,
            outcome: AttemptOutcome::Saved,
        });
        return Resolution::Saved {
            asset: SavedAsset {
                variant: candidate.variant,
                path,
                is_svg: result.is_svg,
                content_type: result.content_type,
                size: bytes.len(),
            },
            attempts,
        };
    }

    Resolution::NotFound { attempts }
}
