//! Android `strings.xml` exporter.
//!
//! Writes `<root>/<path>/values[-<lang>]/strings.xml`. The empty language code is the
//! default locale and maps to the plain `values` directory. Values are written as XML text
//! with no Android-specific escaping.

use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use std::{io::Write, path::Path};

use crate::{
    error::Error,
    formats::{log_skipped_language, write_output},
    types::Document,
};

#[derive(Debug)]
pub struct Format {
    pub language: String,
    pub strings: Vec<StringResource>,
}

#[derive(Debug)]
pub struct StringResource {
    pub name: String,
    pub value: String,
}

impl Format {
    /// Builds the resource file for `language`; `None` when it has no non-empty translations.
    pub fn from_document(doc: &Document, language: &str) -> Option<Self> {
        let translations = doc.string_map_for_language(language);
        if translations.is_empty() {
            return None;
        }
        let strings = doc
            .key_names()
            .iter()
            .map(|key| StringResource {
                name: key.clone(),
                value: translations.get(key.as_str()).copied().unwrap_or_default().to_string(),
            })
            .collect();
        Some(Format {
            language: language.to_string(),
            strings,
        })
    }

    /// Resource directory name for this file's language.
    pub fn values_dir(&self) -> String {
        values_dir(&self.language)
    }

    pub fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut xml_writer = Writer::new(&mut writer);

        xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;

        xml_writer.write_event(Event::Start(BytesStart::new("resources")))?;

        for sr in &self.strings {
            xml_writer.write_event(Event::Text(BytesText::new("\n\t")))?;
            let mut elem = BytesStart::new("string");
            elem.push_attribute(("name", sr.name.as_str()));
            xml_writer.write_event(Event::Start(elem))?;
            xml_writer.write_event(Event::Text(BytesText::new(&sr.value)))?;
            xml_writer.write_event(Event::End(BytesEnd::new("string")))?;
        }

        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
        xml_writer.write_event(Event::End(BytesEnd::new("resources")))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
        Ok(())
    }
}

fn values_dir(language: &str) -> String {
    if language.is_empty() {
        "values".to_string()
    } else {
        format!("values-{language}")
    }
}

pub(crate) fn export(doc: &Document, root: &Path) -> Result<(), Error> {
    for lang in &doc.language_names {
        let Some(format) = Format::from_document(doc, lang) else {
            log_skipped_language(doc, lang);
            continue;
        };
        let path = root
            .join(&doc.path)
            .join(format.values_dir())
            .join("strings.xml");
        let mut content = Vec::new();
        format.to_writer(&mut content)?;
        write_output(doc, &path, &content)?;
    }
    Ok(())
}
