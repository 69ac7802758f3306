//! Document writer options and configuration.

use std::fmt;
use std::sync::Arc;

use super::styler::{TableStyler, UniformBorders};

/// Default heading text.
pub const DEFAULT_HEADING: &str = "Extracted Data Table";

/// Default header labels, in column order.
pub const DEFAULT_COLUMNS: [&str; 3] = ["Name", "Age", "Email"];

/// Options for building and writing the output document.
#[derive(Clone)]
pub struct WriteOptions {
    /// Heading paragraph text
    pub heading: String,

    /// Heading outline level (1-9)
    pub heading_level: u8,

    /// Header row labels for the name, age and email columns
    pub columns: [String; 3],

    /// Styler applied to the table after it is filled
    pub styler: Arc<dyn TableStyler>,

    /// Title recorded in the package properties
    pub title: Option<String>,

    /// Creator recorded in the package properties
    pub creator: Option<String>,
}

impl WriteOptions {
    /// Create new write options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the heading text.
    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = heading.into();
        self
    }

    /// Set the heading level.
    pub fn with_heading_level(mut self, level: u8) -> Self {
        self.heading_level = level;
        self
    }

    /// Set the header row labels.
    pub fn with_columns(
        mut self,
        name: impl Into<String>,
        age: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        self.columns = [name.into(), age.into(), email.into()];
        self
    }

    /// Set the table styler.
    pub fn with_styler(mut self, styler: Arc<dyn TableStyler>) -> Self {
        self.styler = styler;
        self
    }

    /// Set the document title property.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the document creator property.
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            heading: DEFAULT_HEADING.to_string(),
            heading_level: 1,
            columns: DEFAULT_COLUMNS.map(String::from),
            styler: Arc::new(UniformBorders::default()),
            title: None,
            creator: None,
        }
    }
}

impl fmt::Debug for WriteOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteOptions")
            .field("heading", &self.heading)
            .field("heading_level", &self.heading_level)
            .field("columns", &self.columns)
            .field("styler", &self.styler.name())
            .field("title", &self.title)
            .field("creator", &self.creator)
            .finish()
    }
}
