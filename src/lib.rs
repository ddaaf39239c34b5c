#![forbid(unsafe_code)]
//! Localization spreadsheet toolkit for Rust.
//!
//! Loads localization tables from an `.xlsx` workbook (or its JSON/YAML record form) into
//! [`Documents`] and exports each [`Document`] as Apple `.strings`, Android `strings.xml`,
//! a flat JSON bundle or Flutter `.arb` files.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use locsheet::{Documents, codec};
//!
//! // Export every sheet of a workbook according to its metadata cell
//! codec::export("Localizable.xlsx", "build")?;
//!
//! // Or scaffold a new workbook to fill in by hand
//! let docs = Documents::scaffold(&["en", "fr"], &["Main"]);
//! codec::write_documents(&docs, "Localizable.xlsx")?;
//! # Ok::<(), locsheet::Error>(())
//! ```
//!
//! # Export formats
//!
//! - **`ios`**: `<dir>/<lang>.lproj/<file>.strings`
//! - **`android`**: `<path>/values[-<lang>]/strings.xml`
//! - **`json`**: `<dir>/<file>.json` holding every language
//! - **`arb`**: `<dir>/<file>_<lang>.arb` plus a `<dir>/<file>.arb` locale list

pub mod codec;
pub mod error;
pub mod formats;
pub mod key_index;
pub mod records;
pub mod spreadsheet;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    codec::{FileFormat, convert, export, read_documents, write_documents},
    error::Error,
    formats::ExportFormat,
    key_index::KeyIndex,
    records::DocumentRecord,
    spreadsheet::Sheet,
    traits::DocumentCodec,
    types::{Document, Documents},
};
