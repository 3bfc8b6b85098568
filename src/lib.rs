//! # Databags
//!
//! This library loads named, layered data files ("bags") from a project's
//! `databags/` directory, merges same-named files into one logical data set,
//! caches the merged result for the life of a build, and resolves dotted keys
//! into it. Every file a bag was built from can be reported to an enclosing
//! incremental-build system, so cached output is invalidated when a source
//! changes.
//!
//! ## Quick Example
//!
//! ```
//! use databags::{Databags, DependencySet};
//! use serde_json::json;
//!
//! let root = tempfile::tempdir().unwrap();
//! let dir = root.path().join("databags");
//! std::fs::create_dir(&dir).unwrap();
//! std::fs::write(dir.join("colors.json"), r##"{"red": "#ff0000"}"##).unwrap();
//! std::fs::write(dir.join("colors.toml"), "red = \"#00ff00\"\nblue = \"#0000ff\"\n").unwrap();
//!
//! let mut bags = Databags::open(root.path());
//! let mut deps = DependencySet::new();
//!
//! let colors = bags.get_bag("colors", Some(&mut deps)).unwrap().unwrap();
//! assert_eq!(colors["red"], json!("#00ff00"));
//! assert_eq!(colors["blue"], json!("#0000ff"));
//! assert_eq!(deps.len(), 2);
//!
//! let red = bags.lookup("colors.red", None).unwrap().unwrap();
//! assert_eq!(red.to_value(), json!("#00ff00"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Formats (`format`)**: Load `.json`, `.toml` and `.ini` files into
//!   ordered trees. A missing file is "absent", a broken one is an error.
//! - **Registry (`registry`)**: Groups the files of the bag directory by bag
//!   name, the part of the file name before its first `.`.
//! - **Merging (`merge`)**: Deep-merges trees; later sources win.
//! - **Cache (`cache`)**: Builds each bag once and remembers its sources.
//! - **Dotted paths (`path`)**: Splits `bag.key.0.field` into a bag and an
//!   in-bag path and walks it.
//! - **Build context (`context`)**: Receives the sources of every bag read.
//!
//! ## Value Model
//!
//! Bags share one value model, [`serde_json::Value`], with object key order
//! preserved. Values are opaque: nothing is validated against a schema.

pub mod cache;
pub mod config;
pub mod context;
pub mod databags;
pub mod error;
pub mod format;
pub mod merge;
pub mod path;
pub mod registry;

#[cfg(test)]
mod merge_proptest;

/// A merged data set: an ordered mapping from keys to values.
pub type Bag = serde_json::Map<String, serde_json::Value>;

pub use cache::{BagCache, CacheEntry};
pub use config::Config;
pub use context::{BuildContext, DependencySet};
pub use databags::Databags;
pub use error::{Error, Result};
pub use format::Format;
pub use path::Resolved;
pub use registry::{BagRegistry, SourceOrder};
