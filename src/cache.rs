//! In-process caching of merged bags
//!
//! A bag is built the first time it is requested: every candidate source the
//! registry knows for the name is loaded, missing files are skipped, and the
//! rest are merged in registry order. The merged bag and the list of files
//! that actually contributed to it are kept until the cache is flushed.
//!
//! The cache never checks the filesystem for changes. Callers that need to
//! observe edits mid-session call [`BagCache::invalidate`] or
//! [`BagCache::flush`], or build a new cache.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{debug, trace};

use crate::error::Result;
use crate::format;
use crate::merge::merge_into;
use crate::registry::BagRegistry;
use crate::Bag;

/// A merged bag together with the files it was built from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheEntry {
    bag: Bag,
    sources: Vec<PathBuf>,
}

impl CacheEntry {
    pub fn new(bag: Bag, sources: Vec<PathBuf>) -> Self {
        Self { bag, sources }
    }

    /// The merged bag.
    pub fn bag(&self) -> &Bag {
        &self.bag
    }

    /// Files that contributed to the bag, in merge order.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Load and merge `candidates` in order.
    ///
    /// A candidate that does not exist is skipped: it contributes neither
    /// data nor a source. Any other failure aborts the build.
    pub fn build<I, P>(candidates: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut entry = Self::default();
        for candidate in candidates {
            let path = candidate.as_ref();
            match format::load(path)? {
                Some(layer) => {
                    merge_into(&mut entry.bag, &layer);
                    entry.sources.push(path.to_path_buf());
                }
                None => trace!("Skipping missing bag source {}", path.display()),
            }
        }
        Ok(entry)
    }
}

/// Memoized merged bags for one registry
#[derive(Debug, Clone, Default)]
pub struct BagCache {
    registry: BagRegistry,
    entries: HashMap<String, CacheEntry>,
}

impl BagCache {
    /// Create an empty cache over `registry`
    pub fn new(registry: BagRegistry) -> Self {
        Self {
            registry,
            entries: HashMap::new(),
        }
    }

    /// The registry bags are resolved against.
    pub fn registry(&self) -> &BagRegistry {
        &self.registry
    }

    /// Get a bag, building and caching it on first request.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(entry))` for a bag the registry knows
    /// - `Ok(None)` for a name with no discovered sources
    ///
    /// # Errors
    ///
    /// Fails if a source exists but cannot be read or parsed. Nothing is
    /// cached for the name in that case.
    pub fn get(&mut self, name: &str) -> Result<Option<&CacheEntry>> {
        if self.entries.contains_key(name) {
            trace!("Bag '{}' served from cache", name);
        } else {
            let Some(candidates) = self.registry.source_paths(name) else {
                return Ok(None);
            };
            let entry = CacheEntry::build(&candidates)?;
            debug!(
                "Built bag '{}' from {} of {} source(s)",
                name,
                entry.sources.len(),
                candidates.len()
            );
            self.entries.insert(name.to_string(), entry);
        }
        Ok(self.entries.get(name))
    }

    /// Check if a bag is currently cached
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Drop the cached entry for one bag. Returns whether one was cached.
    pub fn invalidate(&mut self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    /// Drop every cached entry.
    pub fn flush(&mut self) {
        debug!("Flushing {} cached bag(s)", self.entries.len());
        self.entries.clear();
    }

    /// Get the number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
