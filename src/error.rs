//! All error types for the locsheet crate.
//!
//! These are returned from all fallible operations (loading, serialization, export, etc.).
//! Missing or empty translations are never errors; exporters skip them.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unsupported file extension `{0}`")]
    UnsupportedExtension(String),

    #[error("invalid format `{0}`")]
    InvalidFormat(String),

    #[error("sheet({sheet}) meta cell (0,0) parse failed: {reason}")]
    InvalidMetadata { sheet: usize, reason: String },

    #[error("sheet({0}) no path defined in meta")]
    MissingPath(usize),

    #[error("record({record}) row {row} has {found} cells, expected {expected}")]
    MalformedRow {
        record: usize,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("export document({index}) failure: {source}")]
    Export {
        index: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("failed to read `{}`: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write `{}`: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("spreadsheet read error: {0}")]
    SpreadsheetRead(#[from] calamine::XlsxError),

    #[error("spreadsheet write error: {0}")]
    SpreadsheetWrite(#[from] rust_xlsxwriter::XlsxError),
}

impl Error {
    /// Wraps a per-document failure with the document's position in its set.
    pub fn in_document(self, index: usize) -> Self {
        Error::Export {
            index,
            source: Box::new(self),
        }
    }

    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Write {
            path: path.into(),
            source,
        }
    }
}
