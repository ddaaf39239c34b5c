use locsheet::codec::{JsonCodec, XlsxCodec, YamlCodec};
use locsheet::{Document, DocumentCodec, Documents, read_documents, write_documents};
use proptest::prelude::*;
use std::collections::BTreeMap;
use std::io::Cursor;

fn key_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_ ]{0,15}").expect("valid key regex")
}

fn value_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 _\\-\\.,!\\?\"'&%]{0,30}")
        .expect("valid value regex")
}

fn language_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::sample::subsequence(vec!["en", "fr", "de", "ja", "zh-Hans"], 1..=3)
        .prop_map(|langs| langs.into_iter().map(str::to_string).collect())
}

fn document_strategy() -> impl Strategy<Value = Document> {
    (
        language_strategy(),
        prop::collection::btree_map(
            key_strategy(),
            prop::collection::vec(value_strategy(), 3),
            1..8,
        ),
        prop::sample::select(vec!["ios", "android", "json", "arb", ""]),
        proptest::string::string_regex("[a-z]{1,8}(/[a-z]{1,8}){0,2}").expect("valid path regex"),
    )
        .prop_map(|(languages, rows, format, path)| {
            build_document(languages, rows, format, path)
        })
}

fn build_document(
    languages: Vec<String>,
    rows: BTreeMap<String, Vec<String>>,
    format: &str,
    path: String,
) -> Document {
    let mut doc = Document::new("Sheet1");
    doc.format = format.to_string();
    doc.path = path;
    doc.set_keys(rows.keys().cloned().collect());
    for (column, lang) in languages.iter().enumerate() {
        doc.set_translations(
            lang.clone(),
            rows.values().map(|values| values[column].clone()).collect(),
        );
    }
    doc.language_names = languages;
    doc
}

fn documents_strategy() -> impl Strategy<Value = Documents> {
    prop::collection::vec(document_strategy(), 1..4).prop_map(|mut documents| {
        for (index, doc) in documents.iter_mut().enumerate() {
            doc.name = format!("Sheet{}", index + 1);
        }
        Documents {
            path: String::new(),
            documents,
        }
    })
}

fn round_trip<C: DocumentCodec>(codec: C, docs: &Documents) -> Documents {
    let mut bytes = Vec::new();
    codec.encode(docs, &mut bytes).expect("encode");
    codec.decode(Cursor::new(bytes)).expect("decode")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_json_round_trip_is_lossless(docs in documents_strategy()) {
        prop_assert_eq!(round_trip(JsonCodec, &docs), docs);
    }

    #[test]
    fn prop_yaml_round_trip_is_lossless(docs in documents_strategy()) {
        prop_assert_eq!(round_trip(YamlCodec, &docs), docs);
    }

    #[test]
    fn prop_string_map_holds_exactly_found_non_empty_keys(doc in document_strategy()) {
        for lang in &doc.language_names {
            let map = doc.string_map_for_language(lang);
            for key in doc.key_names() {
                let found = doc.translation_for_key(lang, key).filter(|v| !v.is_empty());
                prop_assert_eq!(map.get(key.as_str()).copied(), found);
            }
        }
    }
}

#[test]
fn test_spreadsheet_round_trip_through_file() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let mut docs = Documents::scaffold(&["en", "fr"], &["Main", "Settings"]);
    {
        let doc = &mut docs.documents[0];
        doc.path = "ios/Localizable".to_string();
        doc.format = "ios".to_string();
        doc.set_keys(vec!["greeting".to_string(), "hello world".to_string()]);
        doc.set_translations(
            "en",
            vec!["Hello".to_string(), "Hi \"you\" & co".to_string()],
        );
        doc.set_translations("fr", vec!["Bonjour".to_string(), "Salut".to_string()]);
    }
    {
        let doc = &mut docs.documents[1];
        doc.path = "lib/l10n/a&b=c".to_string();
        doc.format = "arb".to_string();
        doc.set_translations("en", vec!["Settings".to_string()]);
        doc.set_translations("fr", vec!["Réglages".to_string()]);
    }

    let path = temp_dir.path().join("Localizable.xlsx");
    write_documents(&docs, &path).unwrap();
    let loaded = read_documents(&path).unwrap();

    assert_eq!(loaded.path, path.display().to_string());
    assert_eq!(loaded.documents, docs.documents);
}

#[test]
fn test_spreadsheet_to_yaml_to_spreadsheet() {
    let mut docs = Documents::scaffold(&["", "fr"], &["Android"]);
    docs.documents[0].path = "res".to_string();
    docs.documents[0].format = "android".to_string();
    docs.documents[0].set_translations("", vec!["Start".to_string()]);

    let from_xlsx = round_trip(XlsxCodec, &docs);
    let from_yaml = round_trip(YamlCodec, &from_xlsx);
    assert_eq!(round_trip(XlsxCodec, &from_yaml), docs);
}
