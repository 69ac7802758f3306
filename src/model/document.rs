//! Document-level types.

use super::Table;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A word-processing document under construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (title, creator, etc.)
    pub metadata: Metadata,

    /// Body content in order
    pub blocks: Vec<Block>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a heading paragraph.
    pub fn add_heading(&mut self, text: impl Into<String>, level: u8) -> &mut Heading {
        self.blocks.push(Block::Heading(Heading {
            text: text.into(),
            level,
        }));
        match self.blocks.last_mut() {
            Some(Block::Heading(h)) => h,
            _ => unreachable!("heading was just pushed"),
        }
    }

    /// Append a table with `rows` rows and `cols` columns.
    pub fn add_table(&mut self, rows: usize, cols: usize) -> &mut Table {
        self.blocks.push(Block::Table(Table::with_size(rows, cols)));
        match self.blocks.last_mut() {
            Some(Block::Table(t)) => t,
            _ => unreachable!("table was just pushed"),
        }
    }

    /// Iterate over headings.
    pub fn headings(&self) -> impl Iterator<Item = &Heading> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Heading(h) => Some(h),
            _ => None,
        })
    }

    /// Iterate over tables.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }

    /// Number of tables in the document.
    pub fn table_count(&self) -> usize {
        self.tables().count()
    }

    /// Check if the document has no content.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|block| match block {
                Block::Heading(h) => h.text.clone(),
                Block::Table(t) => t.plain_text(),
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// A body element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    /// Heading paragraph
    Heading(Heading),
    /// Table
    Table(Table),
}

/// A heading paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading text
    pub text: String,
    /// Outline level (1-9)
    pub level: u8,
}

impl Heading {
    /// Paragraph style id used for this heading (e.g. `Heading1`).
    pub fn style_id(&self) -> String {
        format!("Heading{}", self.level)
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Author recorded in the package properties
    pub creator: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Metadata stamped with the current time.
    pub fn now() -> Self {
        Self {
            created: Some(Utc::now()),
            ..Self::default()
        }
    }
}
