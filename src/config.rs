//! # Databag Settings
//!
//! Settings controlling where bags are discovered and in which order
//! same-named sources are merged. They deserialize from TOML, so a project
//! can keep them alongside the rest of its configuration:
//!
//! ```toml
//! directory = "data"
//! source_order = "listing"
//! ```
//!
//! Every field is optional; omitted fields take their defaults.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::registry::SourceOrder;

/// Default bag directory, relative to the project root.
pub const DEFAULT_DIRECTORY: &str = "databags";

/// Databag settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding the bag files, relative to the project root.
    pub directory: String,
    /// Merge order of same-named sources.
    pub source_order: SourceOrder,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory: DEFAULT_DIRECTORY.to_string(),
            source_order: SourceOrder::default(),
        }
    }
}

impl Config {
    /// Parse settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|err| Error::Config {
            message: err.to_string().trim_end().to_string(),
        })
    }
}
