//! Discovery of bag sources in the bag directory
//!
//! The registry lists the bag directory once, non-recursively, and groups
//! every `.ini`, `.json` and `.toml` file by its bag name: the part of the
//! file name before its first `.`. `colors.json` and `colors.toml` are both
//! sources of the bag `colors`.
//!
//! A missing or unreadable directory yields an empty registry. The registry
//! is never refreshed; build a new one to pick up added files.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Deserialize;

use crate::format::Format;

/// Order in which same-named sources are merged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceOrder {
    /// Sort by file name, so `x.ini` < `x.json` < `x.toml` and later files win.
    #[default]
    Sorted,
    /// Keep the order the operating system listed the directory in.
    ///
    /// This order is not guaranteed to be stable across platforms or even
    /// across runs.
    Listing,
}

/// Bag name of a file name: everything before the first `.`.
pub fn bag_name(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

/// Bag sources discovered in one directory, grouped by bag name
#[derive(Debug, Clone, Default)]
pub struct BagRegistry {
    directory: PathBuf,
    bags: HashMap<String, Vec<String>>,
}

impl BagRegistry {
    /// Scan `directory` for bag sources.
    pub fn discover<P: AsRef<Path>>(directory: P, order: SourceOrder) -> Self {
        let directory = directory.as_ref();
        let mut registry = Self::from_file_names(directory, list_file_names(directory));

        if order == SourceOrder::Sorted {
            for sources in registry.bags.values_mut() {
                sources.sort();
            }
        }

        debug!(
            "Discovered {} bag(s) in {}",
            registry.len(),
            directory.display()
        );
        registry
    }

    /// Build a registry from already known file names, without touching disk.
    ///
    /// File names are grouped exactly as [`BagRegistry::discover`] would,
    /// keeping the given order within each bag.
    pub fn from_file_names<P, I, S>(directory: P, file_names: I) -> Self
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut bags: HashMap<String, Vec<String>> = HashMap::new();
        for file_name in file_names {
            let file_name = file_name.into();
            if Format::from_file_name(&file_name).is_none() {
                continue;
            }
            let name = bag_name(&file_name);
            if name.is_empty() {
                debug!("Skipping {}: empty bag name", file_name);
                continue;
            }
            bags.entry(name.to_string()).or_default().push(file_name);
        }
        Self {
            directory: directory.as_ref().to_path_buf(),
            bags,
        }
    }

    /// The directory this registry was built from.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Candidate file names for a bag, in merge order.
    pub fn sources(&self, name: &str) -> Option<&[String]> {
        self.bags.get(name).map(Vec::as_slice)
    }

    /// Candidate paths for a bag, in merge order.
    pub fn source_paths(&self, name: &str) -> Option<Vec<PathBuf>> {
        self.sources(name).map(|files| {
            files
                .iter()
                .map(|file_name| self.directory.join(file_name))
                .collect()
        })
    }

    /// Check whether any source was discovered for a bag
    pub fn contains(&self, name: &str) -> bool {
        self.bags.contains_key(name)
    }

    /// All known bag names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.bags.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.bags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bags.is_empty()
    }
}

/// Names of the immediate entries of `directory`, in listing order.
///
/// A directory that is missing or cannot be listed has no entries.
fn list_file_names(directory: &Path) -> Vec<String> {
    let entries = match std::fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(err) => {
            if err.kind() == std::io::ErrorKind::NotFound {
                debug!("Bag directory {} does not exist", directory.display());
            } else {
                warn!(
                    "Could not list bag directory {}: {}",
                    directory.display(),
                    err
                );
            }
            return Vec::new();
        }
    };

    collect_file_names(directory, entries.map(|entry| entry.map(|e| e.file_name())))
}

/// Keep the UTF-8 names of a directory listing, all or nothing.
///
/// An entry that fails mid-listing discards everything read so far.
fn collect_file_names<I>(directory: &Path, entries: I) -> Vec<String>
where
    I: IntoIterator<Item = std::io::Result<OsString>>,
{
    let mut names = Vec::new();
    for entry in entries {
        let name = match entry {
            Ok(name) => name,
            Err(err) => {
                warn!(
                    "Could not list bag directory {}: {}",
                    directory.display(),
                    err
                );
                return Vec::new();
            }
        };
        match name.into_string() {
            Ok(name) => names.push(name),
            Err(raw) => debug!("Skipping non UTF-8 file name {:?}", raw),
        }
    }
    names
}
