//! Serialized (JSON/YAML) form of a document set.
//!
//! Each document becomes one record:
//!
//! ```yaml
//! - name: Main
//!   path: ios/Localizable
//!   format: ios
//!   language_names: [en, fr]
//!   translations:
//!     - [greeting, Hello, Bonjour]
//!     - [farewell, Bye, Au revoir]
//! ```
//!
//! Every translation row is `[key, value_for_lang0, value_for_lang1, ...]`.

use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    error::Error,
    types::{Document, Documents},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DocumentRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub path: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub format: String,

    #[serde(default, deserialize_with = "lenient_strings")]
    pub language_names: Vec<String>,

    #[serde(default, deserialize_with = "lenient_rows")]
    pub translations: Vec<Vec<String>>,
}

impl DocumentRecord {
    /// Row-major view of `doc`. Missing positions become empty strings.
    pub fn from_document(doc: &Document) -> Self {
        let translations = doc
            .key_names()
            .iter()
            .enumerate()
            .map(|(position, key)| {
                let mut row = Vec::with_capacity(doc.language_names.len() + 1);
                row.push(key.clone());
                row.extend(
                    doc.language_names
                        .iter()
                        .map(|lang| doc.translation_at(lang, position).to_string()),
                );
                row
            })
            .collect();

        DocumentRecord {
            name: doc.name.clone(),
            path: doc.path.clone(),
            format: doc.format.clone(),
            language_names: doc.language_names.clone(),
            translations,
        }
    }

    /// Builds the document this record describes; `index` identifies the record in errors.
    ///
    /// Every row must hold exactly one key plus one value per language.
    pub fn into_document(self, index: usize) -> Result<Document, Error> {
        let expected = self.language_names.len() + 1;
        let mut keys = Vec::with_capacity(self.translations.len());
        let mut columns: Vec<Vec<String>> = self
            .language_names
            .iter()
            .map(|_| Vec::with_capacity(self.translations.len()))
            .collect();

        for (row_index, row) in self.translations.into_iter().enumerate() {
            if row.len() != expected {
                return Err(Error::MalformedRow {
                    record: index,
                    row: row_index,
                    expected,
                    found: row.len(),
                });
            }
            let mut cells = row.into_iter();
            keys.extend(cells.next());
            for (column, value) in columns.iter_mut().zip(cells) {
                column.push(value);
            }
        }

        let mut doc = Document::new(self.name);
        doc.path = self.path;
        doc.format = self.format;
        doc.set_keys(keys);
        for (lang, values) in self.language_names.iter().zip(columns) {
            doc.set_translations(lang.clone(), values);
        }
        doc.language_names = self.language_names;
        Ok(doc)
    }
}

impl Documents {
    pub fn to_records(&self) -> Vec<DocumentRecord> {
        self.documents
            .iter()
            .map(DocumentRecord::from_document)
            .collect()
    }

    /// Builds a set from records, failing on the first malformed one.
    pub fn from_records(records: Vec<DocumentRecord>) -> Result<Self, Error> {
        let documents = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| record.into_document(index))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Documents {
            path: String::new(),
            documents,
        })
    }
}

/// Scalar cell accepted from hand-written JSON/YAML. Non-string scalars are stringified.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    String(String),
    Bool(bool),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Null,
}

impl From<Scalar> for String {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::String(s) => s,
            Scalar::Bool(b) => b.to_string(),
            Scalar::Integer(i) => i.to_string(),
            Scalar::Unsigned(u) => u.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Null => String::new(),
        }
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Scalar::deserialize(deserializer).map(String::from)
}

fn lenient_strings<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let cells = Option::<Vec<Scalar>>::deserialize(deserializer)?;
    Ok(cells
        .unwrap_or_default()
        .into_iter()
        .map(String::from)
        .collect())
}

fn lenient_rows<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<Vec<String>>, D::Error> {
    let rows = Option::<Vec<Vec<Scalar>>>::deserialize(deserializer)?;
    Ok(rows
        .unwrap_or_default()
        .into_iter()
        .map(|row| row.into_iter().map(String::from).collect())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> DocumentRecord {
        DocumentRecord {
            name: "Main".to_string(),
            path: "ios/Localizable".to_string(),
            format: "ios".to_string(),
            language_names: vec!["en".to_string(), "fr".to_string()],
            translations: vec![
                vec!["greeting".to_string(), "Hello".to_string(), "Bonjour".to_string()],
                vec!["farewell".to_string(), "Bye".to_string(), String::new()],
            ],
        }
    }

    #[test]
    fn test_into_document_splits_columns() {
        let doc = record().into_document(0).unwrap();
        assert_eq!(doc.key_names(), ["greeting", "farewell"]);
        assert_eq!(doc.translations_for_language("en"), ["Hello", "Bye"]);
        assert_eq!(doc.translations_for_language("fr"), ["Bonjour", ""]);
        assert_eq!(doc.translation_for_key("fr", "greeting"), Some("Bonjour"));
    }

    #[test]
    fn test_record_round_trip() {
        let original = record();
        let doc = original.clone().into_document(0).unwrap();
        assert_eq!(DocumentRecord::from_document(&doc), original);
    }

    #[test]
    fn test_wrong_arity_fails_fast() {
        let mut bad = record();
        bad.translations[1].pop();
        let err = Documents::from_records(vec![record(), bad]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "record(1) row 1 has 2 cells, expected 3"
        );
    }

    #[test]
    fn test_empty_row_is_malformed() {
        let mut bad = record();
        bad.translations.push(Vec::new());
        assert!(matches!(
            bad.into_document(4),
            Err(Error::MalformedRow {
                record: 4,
                row: 2,
                found: 0,
                ..
            })
        ));
    }

    #[test]
    fn test_from_document_pads_short_sequences() {
        let mut doc = record().into_document(0).unwrap();
        doc.set_translations("fr", vec!["Bonjour".to_string()]);
        let rec = DocumentRecord::from_document(&doc);
        assert_eq!(rec.translations[1], ["farewell", "Bye", ""]);
    }

    #[test]
    fn test_lenient_scalars() {
        let json = r#"{
            "name": 1,
            "path": "p",
            "language_names": ["en", null],
            "translations": [[404, true, 1.5]]
        }"#;
        let rec: DocumentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.name, "1");
        assert_eq!(rec.format, "");
        assert_eq!(rec.language_names, ["en", ""]);
        assert_eq!(rec.translations[0], ["404", "true", "1.5"]);
    }
}
