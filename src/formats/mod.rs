//! Per-platform exporters.
//!
//! Each [`Document`] names its exporter through its `format` tag. Dispatch goes through
//! [`ExportFormat`]; adding an output format means adding a variant and a module here.

pub mod android_strings;
pub mod arb;
pub mod json;
pub mod strings;

use std::{fmt::Display, fs, path::Path, str::FromStr};

use crate::{
    error::Error,
    types::{Document, Documents},
};

/// Output formats a document can be exported to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// One JSON bundle holding every language.
    Json,
    /// Apple `.strings`, one file per `<lang>.lproj` directory.
    IosStrings,
    /// Android `strings.xml`, one file per `values[-<lang>]` directory.
    AndroidXml,
    /// Flutter `.arb`, one file per language plus a locale list.
    Arb,
}

impl ExportFormat {
    pub fn tag(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::IosStrings => "ios",
            ExportFormat::AndroidXml => "android",
            ExportFormat::Arb => "arb",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(ExportFormat::Json),
            "ios" => Ok(ExportFormat::IosStrings),
            "android" => Ok(ExportFormat::AndroidXml),
            "arb" => Ok(ExportFormat::Arb),
            other => Err(Error::InvalidFormat(other.to_string())),
        }
    }
}

impl Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl Document {
    /// Writes this document's files under `root` using the exporter its `format` selects.
    pub fn export<P: AsRef<Path>>(&self, root: P) -> Result<(), Error> {
        let root = root.as_ref();
        let format = self.format.parse::<ExportFormat>()?;
        for lang in &self.language_names {
            let values = self.translations_for_language(lang).len();
            if values != 0 && values != self.key_names().len() {
                tracing::warn!(
                    document = %self.name,
                    language = %lang,
                    values,
                    keys = self.key_names().len(),
                    "translation count differs from key count, missing positions export as empty"
                );
            }
        }
        match format {
            ExportFormat::Json => json::export(self, root),
            ExportFormat::IosStrings => strings::export(self, root),
            ExportFormat::AndroidXml => android_strings::export(self, root),
            ExportFormat::Arb => arb::export(self, root),
        }
    }
}

impl Documents {
    /// Exports every document in order, stopping at the first failure.
    ///
    /// Errors are wrapped with the failing document's index.
    pub fn export<P: AsRef<Path>>(&self, root: P) -> Result<(), Error> {
        let root = root.as_ref();
        for (index, doc) in self.documents.iter().enumerate() {
            doc.export(root).map_err(|e| e.in_document(index))?;
        }
        Ok(())
    }
}

/// Creates the parent directories of `path` and writes `contents`, replacing any existing file.
pub(crate) fn write_output(doc: &Document, path: &Path, contents: &[u8]) -> Result<(), Error> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| Error::write(dir, e))?;
    }
    tracing::info!(
        document = %doc.name,
        keys = doc.key_names().len(),
        path = %path.display(),
        "writing document"
    );
    fs::write(path, contents).map_err(|e| Error::write(path, e))
}

pub(crate) fn log_skipped_language(doc: &Document, language: &str) {
    tracing::debug!(
        document = %doc.name,
        language,
        "translations for language are empty, skipping"
    );
}
