//! Open XML package serialization for DOCX output.
//!
//! Part XML is assembled as strings and stored in a zip container. Only the
//! parts needed for a heading and plain-text tables are produced.

use std::fmt::Write as FmtWrite;
use std::io::{Cursor, Seek, Write};
use std::path::Path;

use quick_xml::escape::escape;
use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Error, Result};
use crate::model::{Block, Document, Heading, Metadata, Table, TableRow};

pub(crate) const DOCUMENT_PART: &str = "word/document.xml";
pub(crate) const STYLES_PART: &str = "word/styles.xml";
const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
const ROOT_RELS_PART: &str = "_rels/.rels";
const DOCUMENT_RELS_PART: &str = "word/_rels/document.xml.rels";
const CORE_PART: &str = "docProps/core.xml";
const APP_PART: &str = "docProps/app.xml";

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

// US Letter, 1" top/bottom and 1.25" left/right margins, in twips.
const PAGE_WIDTH: u32 = 12240;
const PAGE_HEIGHT: u32 = 15840;
const MARGIN_TOP_BOTTOM: u32 = 1440;
const MARGIN_LEFT_RIGHT: u32 = 1800;
const TEXT_WIDTH: u32 = PAGE_WIDTH - 2 * MARGIN_LEFT_RIGHT;

fn xml_err(e: std::fmt::Error) -> Error {
    Error::Render(e.to_string())
}

/// Serialize a document into a complete DOCX package in memory.
pub fn to_bytes(doc: &Document) -> Result<Vec<u8>> {
    let cursor = write_package(doc, Cursor::new(Vec::new()))?;
    Ok(cursor.into_inner())
}

/// Write a document to `path`.
///
/// The package goes to a temporary file next to the target first and is then
/// renamed over it, so a failed write never leaves a truncated document.
pub fn save<P: AsRef<Path>>(doc: &Document, path: P) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    write_package(doc, tmp.as_file_mut())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;

    log::info!("Saved document to {}", path.display());
    Ok(())
}

/// Write all package parts into a zip container.
pub fn write_package<W: Write + Seek>(doc: &Document, writer: W) -> Result<W> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let parts = [
        (CONTENT_TYPES_PART, content_types_xml()),
        (ROOT_RELS_PART, root_rels_xml()),
        (DOCUMENT_RELS_PART, document_rels_xml()),
        (DOCUMENT_PART, document_xml(doc)?),
        (STYLES_PART, styles_xml()?),
        (CORE_PART, core_xml(&doc.metadata)?),
        (APP_PART, app_xml()),
    ];

    for (name, xml) in &parts {
        zip.start_file(*name, options)?;
        zip.write_all(xml.as_bytes())?;
        log::debug!("Wrote part {} ({} bytes)", name, xml.len());
    }

    Ok(zip.finish()?)
}

/// Generate `word/document.xml`.
pub fn document_xml(doc: &Document) -> Result<String> {
    let mut xml = String::with_capacity(4096);
    xml.push_str(XML_DECL);
    write!(xml, r#"<w:document xmlns:w="{}" xmlns:r="{}">"#, NS_W, NS_R).map_err(xml_err)?;
    xml.push_str("<w:body>");

    for block in &doc.blocks {
        match block {
            Block::Heading(heading) => write_heading(&mut xml, heading)?,
            Block::Table(table) => write_table(&mut xml, table)?,
        }
    }

    write!(
        xml,
        r#"<w:sectPr><w:pgSz w:w="{}" w:h="{}"/><w:pgMar w:top="{}" w:right="{}" w:bottom="{}" w:left="{}" w:header="720" w:footer="720" w:gutter="0"/></w:sectPr>"#,
        PAGE_WIDTH,
        PAGE_HEIGHT,
        MARGIN_TOP_BOTTOM,
        MARGIN_LEFT_RIGHT,
        MARGIN_TOP_BOTTOM,
        MARGIN_LEFT_RIGHT
    )
    .map_err(xml_err)?;

    xml.push_str("</w:body></w:document>");
    Ok(xml)
}

fn write_heading(xml: &mut String, heading: &Heading) -> Result<()> {
    write!(
        xml,
        r#"<w:p><w:pPr><w:pStyle w:val="{}"/></w:pPr>"#,
        heading.style_id()
    )
    .map_err(xml_err)?;
    write_run(xml, &heading.text)?;
    xml.push_str("</w:p>");
    Ok(())
}

/// Write `text` as one run. Tabs become `<w:tab/>` between text segments.
fn write_run(xml: &mut String, text: &str) -> Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    check_xml_chars(text)?;

    xml.push_str("<w:r>");
    for (index, segment) in text.split('\t').enumerate() {
        if index > 0 {
            xml.push_str("<w:tab/>");
        }
        if !segment.is_empty() {
            write!(
                xml,
                r#"<w:t xml:space="preserve">{}</w:t>"#,
                escape(segment)
            )
            .map_err(xml_err)?;
        }
    }
    xml.push_str("</w:r>");
    Ok(())
}

/// Reject characters outside the XML 1.0 `Char` production.
///
/// Surrogates cannot occur in a `str`, so only C0 controls other than
/// tab/LF/CR and the U+FFFE/U+FFFF noncharacters need checking.
fn check_xml_chars(text: &str) -> Result<()> {
    let invalid = text.chars().find(|&c| {
        matches!(
            c,
            '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}'
        )
    });
    match invalid {
        Some(c) => Err(Error::Render(format!(
            "text contains character U+{:04X}, which is not allowed in XML: {:?}",
            c as u32, text
        ))),
        None => Ok(()),
    }
}

fn write_table(xml: &mut String, table: &Table) -> Result<()> {
    let cols = table.column_count().max(1) as u32;
    let col_width = TEXT_WIDTH / cols;

    xml.push_str("<w:tbl><w:tblPr>");

    xml.push_str(r#"<w:tblW w:w="0" w:type="auto"/>"#);

    let borders = table.borders();
    if !borders.is_empty() {
        xml.push_str("<w:tblBorders>");
        for (position, border) in borders.iter() {
            write!(
                xml,
                r#"<w:{} w:val="{}" w:sz="{}" w:space="{}" w:color="{}"/>"#,
                position.element_name(),
                border.style.as_str(),
                border.size,
                border.space,
                escape(border.color.as_str())
            )
            .map_err(xml_err)?;
        }
        xml.push_str("</w:tblBorders>");
    }

    xml.push_str(r#"<w:tblLook w:val="04A0" w:firstRow="1" w:lastRow="0" w:firstColumn="1" w:lastColumn="0" w:noHBand="0" w:noVBand="1"/>"#);
    xml.push_str("</w:tblPr>");

    xml.push_str("<w:tblGrid>");
    for _ in 0..cols {
        write!(xml, r#"<w:gridCol w:w="{}"/>"#, col_width).map_err(xml_err)?;
    }
    xml.push_str("</w:tblGrid>");

    let header_rows = table.header().len();
    for (index, row) in table.rows.iter().enumerate() {
        write_row(xml, row, index < header_rows || row.is_header, col_width)?;
    }

    xml.push_str("</w:tbl>");
    Ok(())
}

fn write_row(xml: &mut String, row: &TableRow, header: bool, col_width: u32) -> Result<()> {
    xml.push_str("<w:tr>");
    if header {
        xml.push_str("<w:trPr><w:tblHeader/></w:trPr>");
    }

    for cell in &row.cells {
        write!(
            xml,
            r#"<w:tc><w:tcPr><w:tcW w:w="{}" w:type="dxa"/></w:tcPr><w:p>"#,
            col_width
        )
        .map_err(xml_err)?;
        write_run(xml, &cell.text)?;
        xml.push_str("</w:p></w:tc>");
    }

    xml.push_str("</w:tr>");
    Ok(())
}

/// Generate `word/styles.xml` with Normal, Heading1-9 and Table Normal.
pub fn styles_xml() -> Result<String> {
    let mut xml = String::with_capacity(4096);
    xml.push_str(XML_DECL);
    write!(xml, r#"<w:styles xmlns:w="{}">"#, NS_W).map_err(xml_err)?;

    xml.push_str(r#"<w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:asciiTheme="minorHAnsi" w:hAnsiTheme="minorHAnsi" w:eastAsiaTheme="minorEastAsia" w:cstheme="minorBidi"/><w:sz w:val="24"/><w:szCs w:val="24"/><w:lang w:val="en-US"/></w:rPr></w:rPrDefault><w:pPrDefault/></w:docDefaults>"#);
    xml.push_str(r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>"#);

    for level in 1..=9u8 {
        // Sizes in half-points: 14pt for level 1 down to 11pt.
        let size = 28u32.saturating_sub(2 * (level as u32 - 1)).max(22);
        write!(
            xml,
            r#"<w:style w:type="paragraph" w:styleId="Heading{level}"><w:name w:val="heading {level}"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:uiPriority w:val="9"/><w:qFormat/><w:pPr><w:keepNext/><w:keepLines/><w:spacing w:before="480" w:after="0"/><w:outlineLvl w:val="{outline}"/></w:pPr><w:rPr><w:b/><w:bCs/><w:color w:val="365F91"/><w:sz w:val="{size}"/><w:szCs w:val="{size}"/></w:rPr></w:style>"#,
            level = level,
            outline = level - 1,
            size = size
        )
        .map_err(xml_err)?;
    }

    xml.push_str(r#"<w:style w:type="table" w:default="1" w:styleId="TableNormal"><w:name w:val="Normal Table"/><w:uiPriority w:val="99"/><w:semiHidden/><w:unhideWhenUsed/><w:tblPr><w:tblInd w:w="0" w:type="dxa"/><w:tblCellMar><w:top w:w="0" w:type="dxa"/><w:left w:w="108" w:type="dxa"/><w:bottom w:w="0" w:type="dxa"/><w:right w:w="108" w:type="dxa"/></w:tblCellMar></w:tblPr></w:style>"#);
    xml.push_str("</w:styles>");
    Ok(xml)
}

/// Generate `docProps/core.xml`.
pub fn core_xml(metadata: &Metadata) -> Result<String> {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECL);
    xml.push_str(r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#);

    if let Some(ref title) = metadata.title {
        check_xml_chars(title)?;
        write!(xml, "<dc:title>{}</dc:title>", escape(title.as_str())).map_err(xml_err)?;
    }
    if let Some(ref creator) = metadata.creator {
        check_xml_chars(creator)?;
        write!(xml, "<dc:creator>{}</dc:creator>", escape(creator.as_str())).map_err(xml_err)?;
    }
    if let Some(created) = metadata.created {
        write!(
            xml,
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#,
            created.format("%Y-%m-%dT%H:%M:%SZ")
        )
        .map_err(xml_err)?;
    }

    xml.push_str("</cp:coreProperties>");
    Ok(xml)
}

fn app_xml() -> String {
    format!(
        r#"{}<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties"><Application>docxtract {}</Application></Properties>"#,
        XML_DECL,
        env!("CARGO_PKG_VERSION")
    )
}

fn content_types_xml() -> String {
    format!(
        r#"{}<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/{}" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/{}" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/{}" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/><Override PartName="/{}" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/></Types>"#,
        XML_DECL, DOCUMENT_PART, STYLES_PART, CORE_PART, APP_PART
    )
}

fn root_rels_xml() -> String {
    format!(
        r#"{}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="{}"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="{}"/><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="{}"/></Relationships>"#,
        XML_DECL, DOCUMENT_PART, CORE_PART, APP_PART
    )
}

fn document_rels_xml() -> String {
    format!(
        r#"{}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#,
        XML_DECL
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::apply_borders;
    use chrono::TimeZone;
    use std::io::Read;

    fn sample_document() -> Document {
        let mut doc = Document::new();
        doc.add_heading("Extracted Data Table", 1);
        let table = doc.add_table(1, 3);
        table.header_rows = 1;
        table.rows[0] = TableRow::from_strings(["Name", "Age", "Email"]);
        table.add_row(TableRow::from_strings(["Ada", "36", "ada@example.com"]));
        apply_borders(table);
        doc
    }

    #[test]
    fn test_document_xml_structure() {
        let xml = document_xml(&sample_document()).unwrap();

        assert!(xml.starts_with(XML_DECL));
        assert!(xml.contains(r#"<w:pStyle w:val="Heading1"/>"#));
        assert!(xml.contains("Extracted Data Table"));
        assert_eq!(xml.matches("<w:tr>").count(), 2);
        assert_eq!(xml.matches("<w:tc>").count(), 6);
        assert_eq!(xml.matches("<w:gridCol ").count(), 3);
        assert!(xml.ends_with("</w:body></w:document>"));
    }

    #[test]
    fn test_document_xml_borders() {
        let xml = document_xml(&sample_document()).unwrap();

        for name in ["top", "left", "bottom", "right", "insideH", "insideV"] {
            let element = format!(
                r#"<w:{} w:val="single" w:sz="4" w:space="0" w:color="000000"/>"#,
                name
            );
            assert!(xml.contains(&element), "missing {}", element);
        }
    }

    #[test]
    fn test_table_without_borders_has_no_border_element() {
        let mut doc = Document::new();
        doc.add_table(1, 2);
        let xml = document_xml(&doc).unwrap();
        assert!(!xml.contains("<w:tblBorders>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut doc = Document::new();
        doc.add_heading("Tom & Jerry <cartoons>", 1);
        let xml = document_xml(&doc).unwrap();
        assert!(xml.contains("Tom &amp; Jerry &lt;cartoons&gt;"));
    }

    #[test]
    fn test_empty_cell_has_empty_paragraph() {
        let mut doc = Document::new();
        doc.add_table(1, 1);
        let xml = document_xml(&doc).unwrap();
        assert!(xml.contains("</w:tcPr><w:p></w:p></w:tc>"));
    }

    #[test]
    fn test_tab_becomes_tab_element() {
        let mut doc = Document::new();
        doc.add_heading("Name\tAge", 1);
        let xml = document_xml(&doc).unwrap();
        assert!(xml.contains(
            r#"<w:r><w:t xml:space="preserve">Name</w:t><w:tab/><w:t xml:space="preserve">Age</w:t></w:r>"#
        ));
        assert!(!xml.contains('\t'));
    }

    #[test]
    fn test_control_character_rejected() {
        let mut doc = Document::new();
        let table = doc.add_table(1, 1);
        table.rows[0].cells[0].set_text("Ada\u{c}Lovelace");
        assert!(matches!(document_xml(&doc), Err(Error::Render(_))));

        let mut doc = Document::new();
        doc.add_heading("bad\u{0}", 1);
        assert!(document_xml(&doc).is_err());
    }

    #[test]
    fn test_xml_whitespace_and_unicode_allowed() {
        assert!(check_xml_chars("a\tb\nc\rd é 漢 \u{1F600}").is_ok());
        assert!(check_xml_chars("\u{FFFF}").is_err());
        assert!(check_xml_chars("\u{1F}").is_err());
    }

    #[test]
    fn test_core_xml_rejects_control_characters() {
        let metadata = Metadata {
            title: Some("bad\u{7}".to_string()),
            ..Metadata::default()
        };
        assert!(core_xml(&metadata).is_err());
    }

    #[test]
    fn test_styles_define_headings() {
        let xml = styles_xml().unwrap();
        for level in 1..=9 {
            assert!(xml.contains(&format!(r#"w:styleId="Heading{}""#, level)));
        }
        assert!(xml.contains(r#"<w:outlineLvl w:val="0"/>"#));
    }

    #[test]
    fn test_core_xml_metadata() {
        let metadata = Metadata {
            title: Some("Q&A".to_string()),
            creator: Some("docxtract".to_string()),
            created: Some(chrono::Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()),
        };
        let xml = core_xml(&metadata).unwrap();
        assert!(xml.contains("<dc:title>Q&amp;A</dc:title>"));
        assert!(xml.contains("<dc:creator>docxtract</dc:creator>"));
        assert!(xml.contains("2024-03-01T12:00:00Z"));
    }

    #[test]
    fn test_package_contains_all_parts() {
        let bytes = to_bytes(&sample_document()).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();

        for name in [
            CONTENT_TYPES_PART,
            ROOT_RELS_PART,
            DOCUMENT_RELS_PART,
            DOCUMENT_PART,
            STYLES_PART,
            CORE_PART,
            APP_PART,
        ] {
            assert!(archive.by_name(name).is_ok(), "missing part {}", name);
        }

        let mut document = String::new();
        archive
            .by_name(DOCUMENT_PART)
            .unwrap()
            .read_to_string(&mut document)
            .unwrap();
        assert!(document.contains("ada@example.com"));
    }
}
