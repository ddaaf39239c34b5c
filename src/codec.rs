//! Reading and writing whole document sets, with the file format inferred from the
//! path's extension (`xlsx`, `json`, `yaml`/`yml`).
//!
//! ```rust,no_run
//! use locsheet::codec::{export, read_documents, write_documents};
//!
//! let docs = read_documents("Localizable.xlsx")?;
//! write_documents(&docs, "Localizable.yaml")?;
//! export("Localizable.yaml", "build/l10n")?;
//! # Ok::<(), locsheet::Error>(())
//! ```

use std::{
    fmt::Display,
    io::{Read, Seek, Write},
    path::Path,
};

use crate::{
    error::Error,
    records::DocumentRecord,
    spreadsheet,
    traits::DocumentCodec,
    types::Documents,
};

/// File formats a whole document set can be stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    Xlsx,
    Json,
    Yaml,
}

impl FileFormat {
    /// Infers the format from the path's extension, case-insensitively.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        match extension.to_ascii_lowercase().as_str() {
            "xlsx" => Ok(FileFormat::Xlsx),
            "json" => Ok(FileFormat::Json),
            "yaml" | "yml" => Ok(FileFormat::Yaml),
            _ => Err(Error::UnsupportedExtension(extension.to_string())),
        }
    }
}

impl Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            FileFormat::Xlsx => "xlsx",
            FileFormat::Json => "json",
            FileFormat::Yaml => "yaml",
        })
    }
}

impl DocumentCodec for FileFormat {
    fn decode<R: Read + Seek>(&self, reader: R) -> Result<Documents, Error> {
        match self {
            FileFormat::Xlsx => XlsxCodec.decode(reader),
            FileFormat::Json => JsonCodec.decode(reader),
            FileFormat::Yaml => YamlCodec.decode(reader),
        }
    }

    fn encode<W: Write>(&self, docs: &Documents, writer: W) -> Result<(), Error> {
        match self {
            FileFormat::Xlsx => XlsxCodec.encode(docs, writer),
            FileFormat::Json => JsonCodec.encode(docs, writer),
            FileFormat::Yaml => YamlCodec.encode(docs, writer),
        }
    }
}

/// Spreadsheet workbook, one sheet per document.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxCodec;

impl DocumentCodec for XlsxCodec {
    fn decode<R: Read + Seek>(&self, reader: R) -> Result<Documents, Error> {
        Documents::from_sheets(&spreadsheet::read_xlsx(reader)?)
    }

    fn encode<W: Write>(&self, docs: &Documents, mut writer: W) -> Result<(), Error> {
        writer.write_all(&docs.to_xlsx_bytes()?)?;
        Ok(())
    }
}

/// JSON array of document records.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl DocumentCodec for JsonCodec {
    fn decode<R: Read + Seek>(&self, reader: R) -> Result<Documents, Error> {
        let records: Vec<DocumentRecord> = serde_json::from_reader(reader)?;
        Documents::from_records(records)
    }

    fn encode<W: Write>(&self, docs: &Documents, writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(writer, &docs.to_records())?;
        Ok(())
    }
}

/// YAML sequence of document records.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl DocumentCodec for YamlCodec {
    fn decode<R: Read + Seek>(&self, reader: R) -> Result<Documents, Error> {
        let records: Vec<DocumentRecord> = serde_yaml::from_reader(reader)?;
        Documents::from_records(records)
    }

    fn encode<W: Write>(&self, docs: &Documents, writer: W) -> Result<(), Error> {
        serde_yaml::to_writer(writer, &docs.to_records())?;
        Ok(())
    }
}

/// Loads a document set, choosing the decoder from the file extension.
pub fn read_documents<P: AsRef<Path>>(path: P) -> Result<Documents, Error> {
    let path = path.as_ref();
    let format = FileFormat::from_path(path)?;
    let docs = format.read_from(path)?;
    tracing::info!(
        path = %path.display(),
        %format,
        documents = docs.len(),
        "loaded documents"
    );
    Ok(docs)
}

/// Stores a document set, choosing the encoder from the file extension.
pub fn write_documents<P: AsRef<Path>>(docs: &Documents, path: P) -> Result<(), Error> {
    let path = path.as_ref();
    let format = FileFormat::from_path(path)?;
    format.write_to(docs, path)?;
    tracing::info!(
        path = %path.display(),
        %format,
        documents = docs.len(),
        "wrote documents"
    );
    Ok(())
}

/// Re-encodes the document set at `input` into the format of `output`.
pub fn convert<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<(), Error> {
    let output = output.as_ref();
    // Fail on an unknown output extension before reading anything.
    FileFormat::from_path(output)?;
    let docs = read_documents(input)?;
    write_documents(&docs, output)
}

/// Loads the document set at `input` and exports every document under `root`.
pub fn export<P: AsRef<Path>, Q: AsRef<Path>>(input: P, root: Q) -> Result<(), Error> {
    read_documents(input)?.export(root)
}
