//! Loading bag sources from disk
//!
//! Each supported file format has its own submodule that turns file text
//! into a [`Bag`]. Formats are identified by an explicit [`Format`] tag and
//! looked up in a single registration table, so supporting a new format means
//! adding one row to [`FORMATS`].
//!
//! ## Supported Formats
//!
//! - JSON (json.rs) - objects keep their key order at every level
//! - TOML (toml.rs) - native tables and arrays of tables
//! - INI (ini.rs) - two levels: section, then key to string
//!
//! ## Absent vs. broken sources
//!
//! [`load`] returns `Ok(None)` for a file that does not exist and an
//! [`Error`] for a file that exists but cannot be read or parsed, so callers
//! never confuse "no data" with "broken data".

pub mod ini;
pub mod json;
pub mod toml;

use std::fmt;
use std::io::ErrorKind;
use std::path::Path;

use log::trace;

use crate::error::{Error, Result};
use crate::Bag;

/// Parses the text of one source into a bag, or describes why it can't.
pub type ParseFn = fn(&str) -> std::result::Result<Bag, String>;

/// Tag identifying the syntax of a bag source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Toml,
    Ini,
}

/// A registered format: its tag, its file extension and its parser.
pub struct FormatEntry {
    pub format: Format,
    pub extension: &'static str,
    pub parse: ParseFn,
}

/// Every format a bag source may be written in.
pub const FORMATS: &[FormatEntry] = &[
    FormatEntry {
        format: Format::Ini,
        extension: "ini",
        parse: ini::parse,
    },
    FormatEntry {
        format: Format::Json,
        extension: "json",
        parse: json::parse,
    },
    FormatEntry {
        format: Format::Toml,
        extension: "toml",
        parse: toml::parse,
    },
];

impl Format {
    /// Look up a format by its extension (without the leading dot).
    pub fn from_extension(extension: &str) -> Option<Format> {
        FORMATS
            .iter()
            .find(|entry| entry.extension == extension)
            .map(|entry| entry.format)
    }

    /// Detect the format of a file from the suffix of its name.
    ///
    /// Only the text after the final `.` counts, so `menu.en.json` is JSON
    /// while `menu.json.bak` is not a bag source at all.
    pub fn from_file_name(file_name: &str) -> Option<Format> {
        let (_, extension) = file_name.rsplit_once('.')?;
        Format::from_extension(extension)
    }

    /// Detect the format of a path from its file name.
    pub fn from_path(path: &Path) -> Option<Format> {
        path.file_name()
            .and_then(|name| name.to_str())
            .and_then(Format::from_file_name)
    }

    pub fn extension(self) -> &'static str {
        self.entry().extension
    }

    /// Parse source text written in this format.
    pub fn parse(self, text: &str) -> std::result::Result<Bag, String> {
        (self.entry().parse)(text)
    }

    fn entry(self) -> &'static FormatEntry {
        FORMATS
            .iter()
            .find(|entry| entry.format == self)
            .unwrap_or_else(|| unreachable!("every format is registered"))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Json => "JSON",
            Format::Toml => "TOML",
            Format::Ini => "INI",
        };
        f.write_str(name)
    }
}

/// Read the raw bytes of a source, treating a missing file as absent.
pub fn read_source(path: &Path) -> Result<Option<Vec<u8>>> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(Error::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Load a bag source, dispatching on its extension.
///
/// # Returns
///
/// - `Ok(Some(bag))` when the file was read and parsed
/// - `Ok(None)` when the file does not exist
///
/// # Errors
///
/// Returns `Error::UnsupportedFormat` for an unrecognized extension,
/// `Error::Io` if the file exists but cannot be read, and `Error::Parse` if
/// it is not valid UTF-8 or is malformed for its format.
pub fn load(path: &Path) -> Result<Option<Bag>> {
    let format = Format::from_path(path).ok_or_else(|| Error::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    load_as(path, format)
}

/// Load a bag source with an explicitly chosen format.
pub fn load_as(path: &Path, format: Format) -> Result<Option<Bag>> {
    let Some(bytes) = read_source(path)? else {
        trace!("Bag source {} does not exist", path.display());
        return Ok(None);
    };
    trace!("Read {} bytes from {}", bytes.len(), path.display());

    let parse_error = |message: String| Error::Parse {
        path: path.to_path_buf(),
        format,
        message,
    };

    let text = String::from_utf8(bytes)
        .map_err(|err| parse_error(format!("file content is not valid UTF-8: {}", err)))?;
    format.parse(&text).map(Some).map_err(parse_error)
}
