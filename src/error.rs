//! # Error Handling
//!
//! This module defines the centralized error type for the `databags` crate.
//! It uses the `thiserror` library to describe the fatal failure modes of bag
//! construction with enough context (the offending path and format) to point
//! the user at the broken file.
//!
//! ## Key Components
//!
//! - **`Error`**: The enum of every failure that can reach a caller.
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! A missing bag directory or a missing bag file is *not* an error: those
//! cases are resolved locally as "no data". Only sources that exist but
//! cannot be read or parsed surface here.

use std::path::PathBuf;

use thiserror::Error;

use crate::format::Format;

/// Main error type for databag operations
#[derive(Error, Debug)]
pub enum Error {
    /// An existing bag source could not be read.
    ///
    /// Covers permission problems, read faults and paths that are not
    /// regular files. A source that does not exist never produces this.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A bag source exists but its content is not valid for its format.
    #[error("{format} parsing error in {}: {message}", path.display())]
    Parse {
        path: PathBuf,
        format: Format,
        message: String,
    },

    /// A file was handed to the loader whose extension maps to no format.
    #[error("Unsupported bag file format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// Databag settings could not be parsed.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl Error {
    /// The bag source involved in the failure, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Error::Io { path, .. }
            | Error::Parse { path, .. }
            | Error::UnsupportedFormat { path } => Some(path),
            Error::Config { .. } => None,
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
