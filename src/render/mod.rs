//! Rendering module: building the output document and other output formats.

mod docx;
pub mod inspect;
mod json;
mod options;
pub mod package;
mod styler;
mod text;

pub use docx::DocumentWriter;
pub use inspect::{inspect_docx, inspect_file, DocxSummary, TableSummary};
pub use json::{to_json, JsonFormat};
pub use options::{WriteOptions, DEFAULT_COLUMNS, DEFAULT_HEADING};
pub use styler::{apply_borders, TableStyler, UniformBorders};
pub use text::to_text;
