//! The databags of one project
//!
//! [`Databags`] ties the pieces together for one build or editing session:
//! it discovers the bag directory once, builds bags on demand through a
//! [`BagCache`], resolves dotted keys, and reports every consulted source to
//! the caller's [`BuildContext`].

use std::path::{Path, PathBuf};

use log::debug;

use crate::cache::BagCache;
use crate::config::Config;
use crate::context::{record_sources, BuildContext};
use crate::error::Result;
use crate::path::{dotted_prefixes, resolve, Resolved};
use crate::registry::{BagRegistry, SourceOrder};
use crate::Bag;

/// Bags discovered under a project root, with their merge cache
#[derive(Debug, Clone)]
pub struct Databags {
    root_path: PathBuf,
    cache: BagCache,
}

impl Databags {
    /// Discover the bags of the project at `root` with default settings.
    ///
    /// Bags live in `<root>/databags`. A missing directory means the project
    /// has no bags; it is not an error.
    pub fn open<P: AsRef<Path>>(root: P) -> Self {
        Self::with_config(root, &Config::default())
    }

    /// Discover the bags of the project at `root` with explicit settings.
    pub fn with_config<P: AsRef<Path>>(root: P, config: &Config) -> Self {
        let root_path = root.as_ref().join(&config.directory);
        Self::from_directory(root_path, config.source_order)
    }

    /// Discover bags directly in `directory`.
    pub fn from_directory<P: AsRef<Path>>(directory: P, order: SourceOrder) -> Self {
        let root_path = directory.as_ref().to_path_buf();
        debug!("Loading databags from {}", root_path.display());
        let registry = BagRegistry::discover(&root_path, order);
        Self {
            root_path,
            cache: BagCache::new(registry),
        }
    }

    /// The directory bags are discovered in.
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Names of all discovered bags, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.cache.registry().names()
    }

    /// Check whether a bag with this name was discovered.
    pub fn contains(&self, name: &str) -> bool {
        self.cache.registry().contains(name)
    }

    /// Get a merged bag by name.
    ///
    /// Returns `Ok(None)` if no source was discovered for `name`. When `ctx`
    /// is given, every file the bag was merged from is recorded in it, also
    /// when the bag comes from the cache.
    ///
    /// # Errors
    ///
    /// Fails if one of the bag's sources exists but cannot be read or parsed.
    pub fn get_bag(
        &mut self,
        name: &str,
        ctx: Option<&mut dyn BuildContext>,
    ) -> Result<Option<&Bag>> {
        let Some(entry) = self.cache.get(name)? else {
            return Ok(None);
        };
        record_sources(ctx, entry.sources());
        Ok(Some(entry.bag()))
    }

    /// Look up a dotted key.
    ///
    /// The longest dotted prefix of `key` that names a known bag selects the
    /// bag; the rest of the key is walked inside it. A key that is exactly a
    /// bag name yields the whole bag. Returns `Ok(None)` when no prefix names
    /// a bag or the in-bag walk finds nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use databags::Databags;
    /// use serde_json::json;
    ///
    /// let root = tempfile::tempdir().unwrap();
    /// std::fs::create_dir(root.path().join("databags")).unwrap();
    /// std::fs::write(
    ///     root.path().join("databags/colors.json"),
    ///     r##"{"red": "#ff0000"}"##,
    /// )
    /// .unwrap();
    ///
    /// let mut bags = Databags::open(root.path());
    /// let red = bags.lookup("colors.red", None).unwrap().unwrap();
    /// assert_eq!(red.to_value(), json!("#ff0000"));
    /// assert!(bags.lookup("colors.green", None).unwrap().is_none());
    /// ```
    ///
    /// # Errors
    ///
    /// Fails if the selected bag cannot be built.
    pub fn lookup(
        &mut self,
        key: &str,
        ctx: Option<&mut dyn BuildContext>,
    ) -> Result<Option<Resolved<'_>>> {
        let registry = self.cache.registry();
        let Some((name, local_key)) =
            dotted_prefixes(key).find(|(name, _)| registry.contains(name))
        else {
            return Ok(None);
        };

        let Some(bag) = self.get_bag(name, ctx)? else {
            return Ok(None);
        };
        Ok(match local_key {
            None => Some(Resolved::Bag(bag)),
            Some(local_key) => resolve(bag, local_key).map(Resolved::Value),
        })
    }

    /// Drop the cached copy of one bag so the next request re-reads it.
    pub fn invalidate(&mut self, name: &str) -> bool {
        self.cache.invalidate(name)
    }

    /// Drop every cached bag.
    pub fn flush(&mut self) {
        self.cache.flush();
    }

    /// The underlying cache.
    pub fn cache(&self) -> &BagCache {
        &self.cache
    }
}
