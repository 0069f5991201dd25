//! Output side file and on-disk layout.
//!
//! The side file is a JSON object `{ "outputPath": "..." }` re-read at the top
//! of every cycle, so the operator can retarget output without restarting.

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default side file name, looked up in the working directory.
pub const DEFAULT_SIDE_FILE: &str = "config.json";

const LOGOS_DIR: &str = "logos";
const JSON_DIR: &str = "json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    Missing(PathBuf),
    #[error("cannot read configuration file {path}: {source}")]
    Unreadable { path: PathBuf, source: io::Error },
    #[error("configuration file {path} is not valid JSON: {source}")]
    Invalid {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("configuration file {0} has no usable \"outputPath\"")]
    MissingOutputPath(PathBuf),
}

#[derive(Debug, Error)]
#[error("cannot create output directory {path}: {source}")]
pub struct LayoutError {
    pub path: PathBuf,
    pub source: io::Error,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOutputConfig {
    #[serde(default)]
    output_path: Option<String>,
}

/// Parsed side file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub output_path: PathBuf,
}

impl OutputConfig {
    /// Reads and validates the side file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = match fs::read_to_string(path) {
            Ok(d) => d,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::Missing(path.to_path_buf()))
            }
            Err(source) => {
                return Err(ConfigError::Unreadable {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let raw: RawOutputConfig =
            serde_json::from_str(&data).map_err(|source| ConfigError::Invalid {
                path: path.to_path_buf(),
                source,
            })?;
        match raw.output_path {
            Some(p) if !p.trim().is_empty() => Ok(Self {
                output_path: PathBuf::from(p.trim()),
            }),
            _ => Err(ConfigError::MissingOutputPath(path.to_path_buf())),
        }
    }

    pub fn layout(&self, catalog_file_name: &str) -> OutputLayout {
        OutputLayout::new(&self.output_path, catalog_file_name)
    }
}

/// Directories and files derived from `outputPath`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub root: PathBuf,
    pub logos: PathBuf,
    pub json: PathBuf,
    pub catalog: PathBuf,
}

impl OutputLayout {
    pub fn new(root: &Path, catalog_file_name: &str) -> Self {
        let json = root.join(JSON_DIR);
        Self {
            root: root.to_path_buf(),
            logos: root.join(LOGOS_DIR),
            catalog: json.join(catalog_file_name),
            json,
        }
    }

    /// Creates the root, `logos/` and `json/` directories if absent.
    pub fn ensure(&self) -> Result<(), LayoutError> {
        for dir in [&self.root, &self.logos, &self.json] {
            fs::create_dir_all(dir).map_err(|source| LayoutError {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(())
    }
}
