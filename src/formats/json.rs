//! Flat JSON bundle exporter.
//!
//! Writes a single `<root>/<dir>/<file>.json` holding every language:
//!
//! ```json
//! {
//!   "keys": ["greeting", "farewell"],
//!   "text": {
//!     "en": ["Hello", "Bye"],
//!     "fr": ["Bonjour", ""]
//!   }
//! }
//! ```
//!
//! Value sequences are positional, so empty strings are kept. Languages without any
//! values are left out of `text`.

use std::{collections::HashSet, path::Path};

use serde::{Serialize, Serializer};

use crate::{error::Error, formats::write_output, types::Document};

#[derive(Debug, Serialize)]
pub struct Bundle<'a> {
    pub keys: &'a [String],
    pub text: LanguageTable<'a>,
}

/// Language to value-sequence table, serialized as a JSON object in insertion order.
#[derive(Debug, Default)]
pub struct LanguageTable<'a>(Vec<(&'a str, &'a [String])>);

impl<'a> LanguageTable<'a> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, language: &str) -> Option<&'a [String]> {
        self.0
            .iter()
            .find(|(lang, _)| *lang == language)
            .map(|(_, values)| *values)
    }
}

impl Serialize for LanguageTable<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(lang, values)| (*lang, *values)))
    }
}

impl<'a> Bundle<'a> {
    pub fn from_document(doc: &'a Document) -> Self {
        let mut seen = HashSet::new();
        let mut text = Vec::with_capacity(doc.language_names.len());
        for lang in &doc.language_names {
            let values = doc.translations_for_language(lang);
            if values.is_empty() || !seen.insert(lang.as_str()) {
                continue;
            }
            text.push((lang.as_str(), values));
        }
        Bundle {
            keys: doc.key_names(),
            text: LanguageTable(text),
        }
    }
}

pub(crate) fn export(doc: &Document, root: &Path) -> Result<(), Error> {
    let (dir, file) = doc.path_components();
    let path = root.join(dir).join(format!("{file}.json"));
    let content = serde_json::to_vec_pretty(&Bundle::from_document(doc))?;
    write_output(doc, &path, &content)
}
