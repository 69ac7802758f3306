//! Read back documents produced by [`DocumentWriter`](super::DocumentWriter).
//!
//! This is not a general DOCX reader. It understands the heading paragraphs,
//! plain-text tables and table borders that this crate writes.

use std::io::{Cursor, Read};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;
use zip::ZipArchive;

use crate::error::{Error, Result};
use crate::model::{Border, BorderPosition, BorderStyle, TableBorders};

use super::package::DOCUMENT_PART;

/// What a produced document contains.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocxSummary {
    /// Heading paragraph texts, in order
    pub headings: Vec<String>,

    /// Tables, in order
    pub tables: Vec<TableSummary>,
}

/// Cell texts and borders of one table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableSummary {
    /// Rows of cell texts
    pub rows: Vec<Vec<String>>,

    /// Table-level borders
    pub borders: TableBorders,
}

impl TableSummary {
    /// Number of rows including the header.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Inspect a DOCX file on disk.
pub fn inspect_file<P: AsRef<Path>>(path: P) -> Result<DocxSummary> {
    let bytes = std::fs::read(path)?;
    inspect_docx(&bytes)
}

/// Inspect DOCX bytes.
pub fn inspect_docx(bytes: &[u8]) -> Result<DocxSummary> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|_| Error::InvalidDocument(format!("missing part {}", DOCUMENT_PART)))?
        .read_to_string(&mut xml)?;
    parse_document_xml(&xml)
}

/// Parse a `word/document.xml` body.
pub fn parse_document_xml(xml: &str) -> Result<DocxSummary> {
    let mut reader = Reader::from_str(xml);
    let mut summary = DocxSummary::default();

    let mut table_depth = 0usize;
    let mut in_borders = false;
    let mut in_text = false;
    let mut paragraph = String::new();
    let mut paragraph_style: Option<String> = None;
    let mut row: Option<Vec<String>> = None;
    let mut cell: Option<Vec<String>> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"tbl" => {
                    table_depth += 1;
                    if table_depth == 1 {
                        summary.tables.push(TableSummary::default());
                    }
                }
                b"tblBorders" if table_depth == 1 => in_borders = true,
                b"tr" if table_depth == 1 => row = Some(Vec::new()),
                b"tc" if table_depth == 1 => cell = Some(Vec::new()),
                b"p" => {
                    paragraph.clear();
                    paragraph_style = None;
                }
                b"t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"pStyle" => paragraph_style = attribute(&e, "val")?,
                b"tab" if !in_borders => paragraph.push('\t'),
                b"p" if table_depth == 0 => {}
                b"p" => {
                    if let Some(cell) = cell.as_mut() {
                        cell.push(String::new());
                    }
                }
                name if in_borders => {
                    let name = String::from_utf8_lossy(name);
                    if let Some(position) = BorderPosition::from_element_name(&name) {
                        let border = parse_border(&e)?;
                        if let Some(table) = summary.tables.last_mut() {
                            table.borders.set(position, border);
                        }
                    }
                }
                _ => {}
            },
            Event::Text(t) if in_text => paragraph.push_str(&t.unescape()?),
            Event::End(e) => match e.local_name().as_ref() {
                b"tbl" => table_depth = table_depth.saturating_sub(1),
                b"tblBorders" => in_borders = false,
                b"t" => in_text = false,
                b"p" => {
                    let text = std::mem::take(&mut paragraph);
                    if let Some(cell) = cell.as_mut() {
                        cell.push(text);
                    } else if table_depth == 0 && is_heading_style(paragraph_style.as_deref()) {
                        summary.headings.push(text);
                    }
                }
                b"tc" if table_depth == 1 => {
                    if let (Some(paragraphs), Some(row)) = (cell.take(), row.as_mut()) {
                        row.push(paragraphs.join("\n"));
                    }
                }
                b"tr" if table_depth == 1 => {
                    if let (Some(cells), Some(table)) = (row.take(), summary.tables.last_mut()) {
                        table.rows.push(cells);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(summary)
}

fn is_heading_style(style: Option<&str>) -> bool {
    matches!(style, Some(s) if s == "Title" || s.starts_with("Heading"))
}

fn attribute(e: &BytesStart<'_>, key: &str) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.local_name().as_ref() == key.as_bytes() {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

fn parse_border(e: &BytesStart<'_>) -> Result<Border> {
    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
    let required = |key: &str| -> Result<String> {
        attribute(e, key)?
            .ok_or_else(|| Error::Xml(format!("border {} is missing {}", name, key)))
    };
    let number = |key: &str| -> Result<u32> {
        let value = required(key)?;
        value
            .parse()
            .map_err(|_| Error::Xml(format!("border {} has invalid number {:?}", name, value)))
    };

    let style = required("val")?;
    Ok(Border {
        style: BorderStyle::parse(&style)
            .ok_or_else(|| Error::Xml(format!("unknown border style {:?}", style)))?,
        size: number("sz")?,
        space: attribute(e, "space")?
            .map(|s| s.parse().unwrap_or(0))
            .unwrap_or(0),
        color: attribute(e, "color")?.unwrap_or_else(|| "auto".to_string()),
    })
}
