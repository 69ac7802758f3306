//! # docxtract
//!
//! Extract Name/Age/Email records from loosely structured plain text and
//! write them into a bordered table inside a DOCX document.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docxtract::{extract_file, write_docx};
//!
//! fn main() -> docxtract::Result<()> {
//!     let records = extract_file("sample_data.txt")?;
//!     write_docx(&records, "extracted_data_with_borders.docx")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Input format
//!
//! ```text
//! Name: Ada Lovelace
//! Age: 36
//! Email: ada@example.com
//! ```
//!
//! Each field is matched independently over the whole file and the three
//! match lists are paired by position. Extra matches of one field are
//! dropped unless strict pairing is requested.

pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{
    Block, Border, BorderPosition, BorderStyle, Document, Heading, MatchCounts, Metadata, Record,
    RecordSet, Table, TableBorders, TableCell, TableRow,
};
pub use parser::{ExtractOptions, Extractor, FieldPatterns, PairingMode};
pub use render::{
    apply_borders, DocumentWriter, DocxSummary, JsonFormat, TableStyler, UniformBorders,
    WriteOptions,
};

use std::io::Read;
use std::path::Path;

/// Input file read when no path is given.
pub const DEFAULT_INPUT: &str = "sample_data.txt";

/// Output file written when no path is given.
pub const DEFAULT_OUTPUT: &str = "extracted_data_with_borders.docx";

/// Extract records from a text file with the default patterns.
///
/// # Example
///
/// ```no_run
/// use docxtract::extract_file;
///
/// let records = extract_file("sample_data.txt").unwrap();
/// println!("{} records", records.len());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<RecordSet> {
    Extractor::new()?.extract_file(path)
}

/// Extract records from a text file with custom options.
pub fn extract_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ExtractOptions,
) -> Result<RecordSet> {
    Extractor::with_options(options)?.extract_file(path)
}

/// Extract records from text in memory.
pub fn extract_str(content: &str) -> Result<RecordSet> {
    Extractor::new()?.extract_str(content)
}

/// Extract records from a reader.
pub fn extract_reader<R: Read>(reader: R) -> Result<RecordSet> {
    Extractor::new()?.extract_reader(reader)
}

/// Extract records from a text file, reading it asynchronously.
///
/// Only the read is async; matching runs on the calling task.
#[cfg(feature = "async")]
pub async fn extract_file_async<P: AsRef<Path>>(
    path: P,
    options: ExtractOptions,
) -> Result<RecordSet> {
    let extractor = Extractor::with_options(options)?;
    let content = tokio::fs::read_to_string(path.as_ref()).await?;
    extractor.extract_str(&content)
}

/// Write records to a DOCX file with the default heading and borders.
///
/// # Example
///
/// ```no_run
/// use docxtract::{write_docx, Record};
///
/// let records = vec![Record::new("Ada Lovelace", "36", "ada@example.com")];
/// write_docx(&records, "people.docx").unwrap();
/// ```
pub fn write_docx<P: AsRef<Path>>(records: &[Record], path: P) -> Result<()> {
    DocumentWriter::new().write(records, path)
}

/// Read a text file and write its records to a DOCX file.
///
/// Returns the extracted records so callers can report on them.
pub fn convert_file<I: AsRef<Path>, O: AsRef<Path>>(input: I, output: O) -> Result<RecordSet> {
    Docxtract::new().convert(input, output)
}

/// Builder combining extraction and writing options.
///
/// # Example
///
/// ```no_run
/// use docxtract::Docxtract;
///
/// let records = Docxtract::new()
///     .strict()
///     .with_heading("Staff")
///     .convert("staff.txt", "staff.docx")?;
/// println!("wrote {} rows", records.len());
/// # Ok::<(), docxtract::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Docxtract {
    extract_options: ExtractOptions,
    write_options: WriteOptions,
}

impl Docxtract {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail when the three fields matched a different number of times.
    pub fn strict(mut self) -> Self {
        self.extract_options = self.extract_options.strict();
        self
    }

    /// Only accept labels at the start of a line.
    pub fn anchored(mut self) -> Self {
        self.extract_options = self.extract_options.anchored();
        self
    }

    /// Set custom field patterns.
    pub fn with_patterns(mut self, patterns: FieldPatterns) -> Self {
        self.extract_options = self.extract_options.with_patterns(patterns);
        self
    }

    /// Set the extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract_options = options;
        self
    }

    /// Set the heading text.
    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.write_options = self.write_options.with_heading(heading);
        self
    }

    /// Set the write options.
    pub fn with_write_options(mut self, options: WriteOptions) -> Self {
        self.write_options = options;
        self
    }

    /// Extract records from a text file.
    pub fn extract<P: AsRef<Path>>(&self, path: P) -> Result<RecordSet> {
        Extractor::with_options(self.extract_options.clone())?.extract_file(path)
    }

    /// Extract records from `input` and write them to `output`.
    pub fn convert<I: AsRef<Path>, O: AsRef<Path>>(&self, input: I, output: O) -> Result<RecordSet> {
        let records = self.extract(input)?;
        DocumentWriter::with_options(self.write_options.clone()).write(&records, output)?;
        Ok(records)
    }
}
