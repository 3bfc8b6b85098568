//! Dependency recording for incremental builds
//!
//! A build that reads a bag depends on every file the bag was merged from.
//! Callers that track such dependencies pass a [`BuildContext`] to
//! [`Databags::get_bag`](crate::Databags::get_bag) and
//! [`Databags::lookup`](crate::Databags::lookup); every source of the
//! resolved bag is reported to it, whether the bag was freshly built or
//! served from the cache. Without a context nothing is recorded.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::trace;

/// Collaborator that tracks the files a computation depends on
pub trait BuildContext {
    /// Note that the current computation read `path`.
    fn record_dependency(&mut self, path: &Path);
}

/// Report every source to the context, if there is one.
pub fn record_sources(ctx: Option<&mut dyn BuildContext>, sources: &[PathBuf]) {
    let Some(ctx) = ctx else {
        return;
    };
    for source in sources {
        trace!("Recording dependency on {}", source.display());
        ctx.record_dependency(source);
    }
}

/// A [`BuildContext`] that collects dependencies in first-seen order
#[derive(Debug, Clone, Default)]
pub struct DependencySet {
    paths: Vec<PathBuf>,
    seen: HashSet<PathBuf>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded paths, without duplicates, in the order first recorded.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn contains<P: AsRef<Path>>(&self, path: P) -> bool {
        self.seen.contains(path.as_ref())
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.paths.clear();
        self.seen.clear();
    }
}

impl BuildContext for DependencySet {
    fn record_dependency(&mut self, path: &Path) {
        if self.seen.insert(path.to_path_buf()) {
            self.paths.push(path.to_path_buf());
        }
    }
}

impl BuildContext for Vec<PathBuf> {
    fn record_dependency(&mut self, path: &Path) {
        self.push(path.to_path_buf());
    }
}
