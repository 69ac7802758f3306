//! Record extraction from plain text.

mod extractor;
mod options;

pub use extractor::Extractor;
pub use options::{
    ExtractOptions, FieldPatterns, PairingMode, AGE_PATTERN, EMAIL_PATTERN, NAME_PATTERN,
};
