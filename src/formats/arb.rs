//! Flutter Application Resource Bundle exporter.
//!
//! Writes `<root>/<dir>/<file>_<lang>.arb` per language and a shared
//! `<root>/<dir>/<file>.arb` listing every locale of the document.

use std::{collections::HashSet, path::Path};

use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::{
    error::Error,
    formats::{log_skipped_language, write_output},
    types::Document,
};

const LOCALE_KEY: &str = "@@locale";

/// One `<file>_<lang>.arb` payload: `@@locale` first, then keys in canonical order.
///
/// Keys with an empty value are left out.
#[derive(Debug)]
pub struct Bundle<'a> {
    pub locale: &'a str,
    pub messages: Vec<(&'a str, &'a str)>,
}

impl<'a> Bundle<'a> {
    /// `None` when `language` has no non-empty translations.
    pub fn from_document(doc: &'a Document, language: &'a str) -> Option<Self> {
        let translations = doc.string_map_for_language(language);
        if translations.is_empty() {
            return None;
        }
        let mut seen = HashSet::new();
        let messages = doc
            .key_names()
            .iter()
            .filter_map(|key| {
                let value = translations.get(key.as_str())?;
                seen.insert(key.as_str()).then_some((key.as_str(), *value))
            })
            .collect();
        Some(Bundle {
            locale: language,
            messages,
        })
    }
}

impl Serialize for Bundle<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.messages.len() + 1))?;
        map.serialize_entry(LOCALE_KEY, self.locale)?;
        for (key, value) in &self.messages {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// The shared `<file>.arb` locale list.
#[derive(Debug, Serialize)]
pub struct LocaleList<'a> {
    pub locales: &'a [String],
}

pub(crate) fn export(doc: &Document, root: &Path) -> Result<(), Error> {
    let (dir, file) = doc.path_components();
    let dir = root.join(dir);
    for lang in &doc.language_names {
        let Some(bundle) = Bundle::from_document(doc, lang) else {
            log_skipped_language(doc, lang);
            continue;
        };
        let path = dir.join(format!("{file}_{lang}.arb"));
        write_output(doc, &path, &serde_json::to_vec_pretty(&bundle)?)?;
    }

    let list = LocaleList {
        locales: &doc.language_names,
    };
    write_output(doc, &dir.join(format!("{file}.arb")), &serde_json::to_vec(&list)?)
}
