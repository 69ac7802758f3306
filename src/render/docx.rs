//! DOCX document writer.

use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{Document, Metadata, Record};

use super::options::WriteOptions;
use super::package;

/// Number of table columns: name, age, email.
const COLUMNS: usize = 3;

/// Builds the heading + bordered table document and saves it as DOCX.
#[derive(Debug, Clone, Default)]
pub struct DocumentWriter {
    options: WriteOptions,
}

impl DocumentWriter {
    /// Create a writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Get the writer options.
    pub fn options(&self) -> &WriteOptions {
        &self.options
    }

    /// Build the in-memory document for `records`.
    ///
    /// The table starts with a single header row and gets one body row per
    /// record, in order. The styler runs after the table is filled.
    pub fn build(&self, records: &[Record]) -> Result<Document> {
        let level = self.options.heading_level;
        if !(1..=9).contains(&level) {
            return Err(Error::Render(format!(
                "Heading level must be 1-9, got {}",
                level
            )));
        }

        let mut doc = Document::new();
        doc.metadata = Metadata {
            title: self.options.title.clone(),
            creator: self.options.creator.clone(),
            ..Metadata::now()
        };

        doc.add_heading(self.options.heading.as_str(), level);

        let table = doc.add_table(1, COLUMNS);
        table.header_rows = 1;
        table.rows[0].is_header = true;
        for (cell, label) in table.rows[0].cells.iter_mut().zip(&self.options.columns) {
            cell.set_text(label.as_str());
        }

        for record in records {
            let row = table.push_empty_row();
            for (cell, value) in row.cells.iter_mut().zip(record.fields()) {
                cell.set_text(value);
            }
        }

        self.options.styler.apply(table);
        log::debug!(
            "Built table with {} body rows, styled by {}",
            records.len(),
            self.options.styler.name()
        );

        Ok(doc)
    }

    /// Build the document and serialize it to DOCX bytes.
    pub fn to_bytes(&self, records: &[Record]) -> Result<Vec<u8>> {
        let doc = self.build(records)?;
        package::to_bytes(&doc)
    }

    /// Build the document and write it to `path`, replacing any existing file.
    pub fn write<P: AsRef<Path>>(&self, records: &[Record], path: P) -> Result<()> {
        let doc = self.build(records)?;
        package::save(&doc, path)
    }
}
