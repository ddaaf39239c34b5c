//! Core types for locsheet.
//! Loaders decode into these; exporters and serializers consume these.

use std::collections::HashMap;

use crate::key_index::KeyIndex;

/// Key every scaffolded document starts with.
pub const SCAFFOLD_KEY: &str = "first_key";

/// An ordered collection of documents loaded from one source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Documents {
    /// Path the set was loaded from. Informational only.
    pub path: String,

    pub documents: Vec<Document>,
}

impl Documents {
    /// Builds a set of placeholder documents, one per name, each holding a single
    /// `first_key` row with an empty value for every language.
    ///
    /// The name doubles as the placeholder output path so the set reloads from a
    /// spreadsheet; the format is left empty for hand-editing.
    pub fn scaffold<L, N>(languages: &[L], names: &[N]) -> Self
    where
        L: AsRef<str>,
        N: AsRef<str>,
    {
        let mut docs = Documents::default();
        docs.append_scaffold(languages, names);
        docs
    }

    /// Appends placeholder documents (see [`Documents::scaffold`]) to this set.
    pub fn append_scaffold<L, N>(&mut self, languages: &[L], names: &[N])
    where
        L: AsRef<str>,
        N: AsRef<str>,
    {
        let languages: Vec<String> = languages.iter().map(|l| l.as_ref().to_string()).collect();
        for name in names {
            let mut doc = Document::new(name.as_ref());
            doc.path = name.as_ref().to_string();
            doc.language_names = languages.clone();
            doc.set_keys(vec![SCAFFOLD_KEY.to_string()]);
            for lang in &languages {
                doc.set_translations(lang.clone(), vec![String::new()]);
            }
            self.documents.push(doc);
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// One localization table: keys by languages, mapped to a single export destination.
///
/// `key_names` is the canonical order and drives every iteration. The key index is a
/// lookup cache rebuilt by [`Document::set_keys`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Sheet or record name. Informational only.
    pub name: String,

    /// Output path fragment; directory and base file name split at the last `/`.
    pub path: String,

    /// Export format tag (`json`, `ios`, `android` or `arb`). Validated at export time.
    pub format: String,

    /// Language codes in source column order.
    pub language_names: Vec<String>,

    key_names: Vec<String>,
    translations: HashMap<String, Vec<String>>,
    key_index: KeyIndex,
}

impl Document {
    pub fn new(name: impl Into<String>) -> Self {
        Document {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn key_names(&self) -> &[String] {
        &self.key_names
    }

    /// Replaces the key list and rebuilds the key index.
    pub fn set_keys(&mut self, keys: Vec<String>) {
        self.key_index = KeyIndex::build(&keys);
        self.key_names = keys;
    }

    /// Stores the value sequence for `language`, positionally aligned with the keys.
    ///
    /// Length is not checked against the key list; out-of-range positions read as missing.
    pub fn set_translations(&mut self, language: impl Into<String>, values: Vec<String>) {
        self.translations.insert(language.into(), values);
    }

    /// Raw value sequence for `language`; empty when the language has none.
    pub fn translations_for_language(&self, language: &str) -> &[String] {
        self.translations
            .get(language)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Value at `position` for `language`, or the empty string when out of range.
    pub fn translation_at(&self, language: &str, position: usize) -> &str {
        self.translations_for_language(language)
            .get(position)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Resolves `key` through the key index.
    ///
    /// Returns `None` when the language is absent, the key is unknown, or the key's
    /// position lies past the end of the language's values.
    pub fn translation_for_key(&self, language: &str, key: &str) -> Option<&str> {
        let position = self.key_index.lookup(key)?;
        self.translations
            .get(language)?
            .get(position)
            .map(String::as_str)
    }

    /// Key to value map for `language`, built in canonical key order.
    ///
    /// Keys whose lookup fails or whose value is empty are left out, so an empty map means
    /// the language has nothing to export.
    pub fn string_map_for_language(&self, language: &str) -> HashMap<&str, &str> {
        let mut map = HashMap::with_capacity(self.key_names.len());
        for key in &self.key_names {
            match self.translation_for_key(language, key) {
                Some(value) if !value.is_empty() => {
                    map.insert(key.as_str(), value);
                }
                _ => {}
            }
        }
        map
    }

    /// Splits `path` at the last `/` into `(dir, file)`.
    ///
    /// Without a `/`, or with one only in first position, `dir` is `"."`: a leading slash
    /// never makes the path absolute, so output always lands under the export root.
    pub fn path_components(&self) -> (&str, &str) {
        match self.path.rfind('/') {
            Some(0) => (".", &self.path[1..]),
            Some(pos) => (&self.path[..pos], &self.path[pos + 1..]),
            None => (".", self.path.as_str()),
        }
    }
}
