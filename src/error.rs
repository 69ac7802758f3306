//! Error types for docxtract library.

use std::io;
use thiserror::Error;

/// Result type alias for docxtract operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting records or writing documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading the input or writing the output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A field pattern failed to compile or has no capture group.
    #[error("Invalid pattern: {0}")]
    Pattern(String),

    /// Label counts differ and strict pairing was requested.
    #[error("Mismatched field counts: {names} names, {ages} ages, {emails} emails")]
    CountMismatch {
        names: usize,
        ages: usize,
        emails: usize,
    },

    /// Error writing or reading the zip container.
    #[error("Package error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Error parsing XML inside a package.
    #[error("XML error: {0}")]
    Xml(String),

    /// The package is missing a required part.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Error during rendering (DOCX, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Pattern(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<tempfile::PersistError> for Error {
    fn from(err: tempfile::PersistError) -> Self {
        Error::Io(err.error)
    }
}
