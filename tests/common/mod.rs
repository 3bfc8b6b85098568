//! Shared test utilities for integration tests.
//!
//! This module provides fixtures and helpers to build throwaway projects
//! with a `databags/` directory, or to open the checked-in sample site under
//! `tests/testdata/`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_bag("colors.json", r#"{"red": "#f00"}"#);
//!     let mut bags = fixture.databags();
//!     // ... test code
//! }
//! ```

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

use databags::Databags;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use databags::{Databags, DependencySet, Error, SourceOrder};
    #[allow(unused_imports)]
    pub use serde_json::{json, Value};

    #[allow(unused_imports)]
    pub use super::{sample_site, TestFixture};
}

/// Path to the testdata directory containing project fixtures.
pub const TESTDATA_DIR: &str = "tests/testdata";

/// Absolute path of the checked-in sample project.
pub fn sample_site() -> PathBuf {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR should be set during tests");
    PathBuf::from(manifest_dir)
        .join(TESTDATA_DIR)
        .join("sample-site")
}

/// A temporary project root with an optional `databags/` directory.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new()
///     .with_bag("colors.json", r#"{"red": "#ff0000"}"#)
///     .with_bag("colors.toml", "blue = \"#0000ff\"\n");
///
/// let mut bags = fixture.databags();
/// assert!(bags.get_bag("colors", None).unwrap().is_some());
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new fixture with an empty temporary project root.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a file to the `databags/` directory.
    pub fn with_bag(self, file_name: &str, content: &str) -> Self {
        let dir = self.temp_dir.child("databags");
        dir.create_dir_all().expect("Failed to create databags directory");
        dir.child(file_name)
            .write_str(content)
            .expect("Failed to write bag file");
        self
    }

    /// Add a binary file to the `databags/` directory.
    pub fn with_binary_bag(self, file_name: &str, content: &[u8]) -> Self {
        let dir = self.temp_dir.child("databags");
        dir.create_dir_all().expect("Failed to create databags directory");
        dir.child(file_name)
            .write_binary(content)
            .expect("Failed to write bag file");
        self
    }

    /// Add a file anywhere under the project root.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        let child = self.temp_dir.child(path);
        if let Some(parent) = child.path().parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        child
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the project root.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of a file in the `databags/` directory.
    pub fn bag_path(&self, file_name: &str) -> PathBuf {
        self.temp_dir.path().join("databags").join(file_name)
    }

    /// Open the project's databags with default settings.
    pub fn databags(&self) -> Databags {
        Databags::open(self.path())
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
