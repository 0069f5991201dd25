//! One store record in the catalog.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BACKGROUND_COLOR: &str = "ffffff";
pub const DEFAULT_BARCODE_FORMAT: &str = "CODE_128";

/// A catalog record. Field order here is the key order written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub name: String,
    /// Hex colour without `#`.
    pub background_color: String,
    /// Identifier the logo was fetched with.
    pub source: String,
    pub aliases: Option<String>,
    pub category: String,
    pub barcode_format: String,
}

impl CatalogEntry {
    /// New entry with the standard defaults for colour, category and barcode format.
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            source: source.into(),
            aliases: None,
            category: String::new(),
            barcode_format: DEFAULT_BARCODE_FORMAT.to_string(),
        }
    }
}
