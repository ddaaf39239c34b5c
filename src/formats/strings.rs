//! Apple `.strings` exporter.
//!
//! Writes `<root>/<dir>/<lang>.lproj/<file>.strings` for every language that has at least
//! one non-empty translation.

use std::{io::Write, path::Path};

use crate::{
    error::Error,
    formats::{log_skipped_language, write_output},
    types::Document,
};

/// The contents of one `.strings` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    pub language: String,
    pub pairs: Vec<Pair>,
}

impl Format {
    /// Builds the file for `language`, one pair per key in canonical order.
    ///
    /// Returns `None` when the language has no non-empty translations.
    pub fn from_document(doc: &Document, language: &str) -> Option<Self> {
        let translations = doc.string_map_for_language(language);
        if translations.is_empty() {
            return None;
        }
        let pairs = doc
            .key_names()
            .iter()
            .map(|key| Pair {
                key: key.clone(),
                value: translations.get(key.as_str()).copied().unwrap_or_default().to_string(),
            })
            .collect();
        Some(Format {
            language: language.to_string(),
            pairs,
        })
    }

    pub fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut content = String::new();
        for pair in &self.pairs {
            content.push_str(&pair.to_string());
            content.push('\n');
        }
        writer.write_all(content.as_bytes()).map_err(Error::Io)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub key: String,
    pub value: String,
}

impl Pair {
    /// Key as written: quoted only when it contains a space.
    pub fn formatted_key(&self) -> String {
        if self.key.contains(' ') {
            format!("\"{}\"", self.key)
        } else {
            self.key.clone()
        }
    }

    /// Value with `"` and newlines escaped.
    pub fn escaped_value(&self) -> String {
        self.value.replace('"', "\\\"").replace('\n', "\\n")
    }

    fn to_string(&self) -> String {
        format!("{}=\"{}\";", self.formatted_key(), self.escaped_value())
    }
}

pub(crate) fn export(doc: &Document, root: &Path) -> Result<(), Error> {
    let (dir, file) = doc.path_components();
    for lang in &doc.language_names {
        let Some(format) = Format::from_document(doc, lang) else {
            log_skipped_language(doc, lang);
            continue;
        };
        let path = root
            .join(dir)
            .join(format!("{lang}.lproj"))
            .join(format!("{file}.strings"));
        let mut content = Vec::new();
        format.to_writer(&mut content)?;
        write_output(doc, &path, &content)?;
    }
    Ok(())
}
