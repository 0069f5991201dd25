//! JSON catalog of stores (`json/stores.json`).
//!
//! The file is a pretty-printed array rewritten in full on every save. It is
//! treated as regenerable: content that isn't an array or a single object is
//! dropped with a warning instead of being repaired. Existing records are kept
//! as raw JSON values so fields this tool doesn't know about survive.

mod entry;

pub use entry::{CatalogEntry, DEFAULT_BACKGROUND_COLOR, DEFAULT_BARCODE_FORMAT};

use serde_json::Value;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read catalog {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("cannot serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("cannot write catalog {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// How the on-disk catalog was interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// No file yet.
    Missing,
    /// File exists but is blank.
    Empty,
    /// A JSON array with this many records.
    Loaded(usize),
    /// A single object, wrapped into a one-element list.
    Normalized,
    /// Unusable content, replaced by an empty list.
    Discarded(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: Vec<Value>,
}

impl Catalog {
    /// Loads the catalog at `path`.
    ///
    /// Only an unreadable file is an error; malformed content yields an empty
    /// catalog and [`LoadStatus::Discarded`].
    pub fn load(path: &Path) -> Result<(Self, LoadStatus), CatalogError> {
        let data = match fs::read(path) {
            Ok(d) => d,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok((Self::default(), LoadStatus::Missing))
            }
            Err(source) => {
                return Err(CatalogError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let (catalog, status) = Self::parse(&data);
        if let LoadStatus::Discarded(reason) = &status {
            tracing::warn!(
                "catalog {} discarded and started fresh: {}",
                path.display(),
                reason
            );
        }
        Ok((catalog, status))
    }

    /// Interprets raw file content.
    ///
    /// Content that is not valid UTF-8 is discarded rather than repaired, so
    /// existing records are never rewritten with replacement characters.
    pub fn parse(data: &[u8]) -> (Self, LoadStatus) {
        let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
        if data.iter().all(u8::is_ascii_whitespace) {
            return (Self::default(), LoadStatus::Empty);
        }
        match serde_json::from_slice::<Value>(data) {
            Ok(Value::Array(entries)) => {
                let n = entries.len();
                (Self { entries }, LoadStatus::Loaded(n))
            }
            Ok(obj @ Value::Object(_)) => (
                Self { entries: vec![obj] },
                LoadStatus::Normalized,
            ),
            Ok(other) => (
                Self::default(),
                LoadStatus::Discarded(format!("expected an array or object, found {}", kind(&other))),
            ),
            Err(e) => (Self::default(), LoadStatus::Discarded(e.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Value] {
        &self.entries
    }

    /// Appends a record. Duplicate `source` values are allowed.
    pub fn push(&mut self, entry: &CatalogEntry) -> Result<(), CatalogError> {
        self.entries.push(serde_json::to_value(entry)?);
        Ok(())
    }

    /// Pretty-printed UTF-8 JSON for the whole catalog.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    /// Rewrites `path` with the full catalog.
    ///
    /// Writes a temp file in the same directory, syncs it, then renames it over
    /// `path`, so a crash never leaves a half-written catalog. The target keeps
    /// its permissions; a new catalog gets the usual `0644`.
    pub fn save(&self, path: &Path) -> Result<(), CatalogError> {
        let json = self.to_json()?;
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let write_err = |source: io::Error| CatalogError::Write {
            path: path.to_path_buf(),
            source,
        };

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(json.as_bytes()).map_err(write_err)?;
        tmp.write_all(b"\n").map_err(write_err)?;
        if let Some(perms) = target_permissions(path) {
            tmp.as_file().set_permissions(perms).map_err(write_err)?;
        }
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(path).map_err(|e| write_err(e.error))?;
        tracing::debug!("wrote {} entries to {}", self.len(), path.display());
        Ok(())
    }
}

/// Permissions the rewritten catalog should carry.
///
/// The temp file is created owner-only, which must not leak onto the catalog.
fn target_permissions(path: &Path) -> Option<fs::Permissions> {
    match fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(_) => new_file_permissions(),
    }
}

#[cfg(unix)]
fn new_file_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<fs::Permissions> {
    None
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
