//! Spreadsheet source and sink.
//!
//! Every sheet holds one document:
//!
//! |             | en       | fr        |
//! |-------------|----------|-----------|
//! | *meta*      |          |           |
//! | greeting    | Hello    | Bonjour   |
//!
//! Cell (0,0) carries metadata as a query string (`path=ios/Localizable&format=ios`, newlines
//! also separate pairs), row 0 the language codes and column 0 the keys.

use std::{
    borrow::Cow,
    io::{Cursor, Read, Seek},
};

use calamine::{Data, Reader, Xlsx};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use rust_xlsxwriter::{Format as CellFormat, Workbook};

use crate::{
    error::Error,
    types::{Document, Documents},
};

/// Characters escaped in metadata values so they survive query-string decoding.
const META_VALUE: &AsciiSet = &CONTROLS.add(b'%').add(b'&').add(b'=').add(b'+').add(b'#');

const CELL_FONT: &str = "Consolas";
const CELL_FONT_SIZE: f64 = 10.0;
const COLUMN_WIDTH: f64 = 24.0;

/// A rectangular grid of cell strings. Short rows read as empty cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Sheet {
            name: name.into(),
            rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// Metadata decoded from a sheet's (0,0) cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetMeta {
    pub path: String,
    pub format: String,
}

impl SheetMeta {
    /// Decodes `cell` for the sheet at `sheet`; a missing or empty `path` is an error.
    ///
    /// For repeated keys the first value wins.
    pub fn parse(cell: &str, sheet: usize) -> Result<Self, Error> {
        let query = cell.replace('\n', "&");
        check_percent_escapes(&query).map_err(|reason| Error::InvalidMetadata { sheet, reason })?;

        let mut path: Option<Cow<'_, str>> = None;
        let mut format: Option<Cow<'_, str>> = None;
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "path" if path.is_none() => path = Some(value),
                "format" if format.is_none() => format = Some(value),
                _ => {}
            }
        }

        let path = path.map(Cow::into_owned).unwrap_or_default();
        if path.is_empty() {
            return Err(Error::MissingPath(sheet));
        }
        Ok(SheetMeta {
            path,
            format: format.map(Cow::into_owned).unwrap_or_default(),
        })
    }

    pub fn encode(&self) -> String {
        format!(
            "path={}&format={}",
            utf8_percent_encode(&self.path, META_VALUE),
            utf8_percent_encode(&self.format, META_VALUE)
        )
    }
}

/// Rejects `%` not followed by two hex digits, which query decoding would pass through silently.
fn check_percent_escapes(query: &str) -> Result<(), String> {
    let bytes = query.as_bytes();
    for (pos, _) in query.match_indices('%') {
        let valid = bytes
            .get(pos + 1..pos + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !valid {
            let end = query[pos..]
                .char_indices()
                .nth(3)
                .map_or(query.len(), |(i, _)| pos + i);
            return Err(format!("invalid URL escape {:?}", &query[pos..end]));
        }
    }
    Ok(())
}

impl Document {
    /// Reads the document held by `sheet`; `None` when the sheet has no translatable content.
    pub fn from_sheet(sheet: &Sheet, index: usize) -> Result<Option<Self>, Error> {
        let rows = sheet.row_count();
        let columns = sheet.column_count();
        if rows <= 1 || columns <= 1 {
            tracing::debug!(
                sheet = index,
                name = %sheet.name,
                "sheet has no translations, skipping"
            );
            return Ok(None);
        }

        let meta = SheetMeta::parse(sheet.cell(0, 0), index)?;
        let mut doc = Document::new(sheet.name.clone());
        doc.path = meta.path;
        doc.format = meta.format;
        doc.language_names = (1..columns)
            .map(|column| sheet.cell(0, column).to_string())
            .collect();
        doc.set_keys((1..rows).map(|row| sheet.cell(row, 0).to_string()).collect());

        for (column, lang) in (1..columns).zip(doc.language_names.clone()) {
            let values = (1..rows)
                .map(|row| sheet.cell(row, column).to_string())
                .collect();
            doc.set_translations(lang, values);
        }
        Ok(Some(doc))
    }

    /// Lays this document out as a sheet named after it.
    pub fn to_sheet(&self) -> Sheet {
        let meta = SheetMeta {
            path: self.path.clone(),
            format: self.format.clone(),
        };
        let mut header = Vec::with_capacity(self.language_names.len() + 1);
        header.push(meta.encode());
        header.extend(self.language_names.iter().cloned());

        let mut rows = Vec::with_capacity(self.key_names().len() + 1);
        rows.push(header);
        for (position, key) in self.key_names().iter().enumerate() {
            let mut row = Vec::with_capacity(self.language_names.len() + 1);
            row.push(key.clone());
            row.extend(
                self.language_names
                    .iter()
                    .map(|lang| self.translation_at(lang, position).to_string()),
            );
            rows.push(row);
        }
        Sheet::new(self.name.clone(), rows)
    }
}

impl Documents {
    /// Builds a set from sheets in order, skipping sheets without content.
    pub fn from_sheets(sheets: &[Sheet]) -> Result<Self, Error> {
        let mut docs = Documents::default();
        for (index, sheet) in sheets.iter().enumerate() {
            if let Some(doc) = Document::from_sheet(sheet, index)? {
                docs.documents.push(doc);
            }
        }
        Ok(docs)
    }

    pub fn to_sheets(&self) -> Vec<Sheet> {
        self.documents.iter().map(Document::to_sheet).collect()
    }
}

/// Reads every worksheet of an `.xlsx` workbook as a grid anchored at cell A1.
pub fn read_xlsx<R: Read + Seek>(reader: R) -> Result<Vec<Sheet>, Error> {
    let mut workbook = Xlsx::new(reader)?;
    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&name)?;
        let (height, width) = match range.end() {
            Some((row, column)) => (row as usize + 1, column as usize + 1),
            None => (0, 0),
        };
        let rows = (0..height)
            .map(|row| {
                (0..width)
                    .map(|column| {
                        range
                            .get_value((row as u32, column as u32))
                            .map(cell_to_string)
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();
        sheets.push(Sheet::new(name, rows));
    }
    Ok(sheets)
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Encodes sheets as an `.xlsx` workbook: bold headers, plain bodies, fixed column widths.
pub fn write_xlsx(sheets: &[Sheet]) -> Result<Vec<u8>, Error> {
    let body = CellFormat::new()
        .set_font_name(CELL_FONT)
        .set_font_size(CELL_FONT_SIZE);
    let header = body.clone().set_bold();

    let mut workbook = Workbook::new();
    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;
        for (row, cells) in sheet.rows.iter().enumerate() {
            for (column, value) in cells.iter().enumerate() {
                let is_header = (row == 0) != (column == 0);
                let format = if is_header { &header } else { &body };
                worksheet.write_string_with_format(
                    row as u32,
                    column as u16,
                    value.as_str(),
                    format,
                )?;
            }
        }
        for column in 0..sheet.column_count().max(1) {
            worksheet.set_column_width(column as u16, COLUMN_WIDTH)?;
        }
    }
    Ok(workbook.save_to_buffer()?)
}

impl Documents {
    pub fn from_xlsx_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Documents::from_sheets(&read_xlsx(Cursor::new(bytes))?)
    }

    pub fn to_xlsx_bytes(&self) -> Result<Vec<u8>, Error> {
        write_xlsx(&self.to_sheets())
    }
}
