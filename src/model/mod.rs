//! Data model for extracted records and the output document.
//!
//! Records come out of the parser; the document model is what the renderer
//! builds from them before serializing to an Open XML package.

mod document;
mod record;
mod table;

pub use document::{Block, Document, Heading, Metadata};
pub use record::{MatchCounts, Record, RecordSet};
pub use table::{
    Border, BorderPosition, BorderStyle, Table, TableBorders, TableCell, TableProperties, TableRow,
};
