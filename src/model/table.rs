//! Table types.

use serde::{Deserialize, Serialize};

/// A table structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table
    pub rows: Vec<TableRow>,

    /// Number of header rows (0 = no header)
    pub header_rows: u8,

    /// Table-level style metadata
    pub properties: TableProperties,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table with `rows` empty rows of `cols` cells each.
    pub fn with_size(rows: usize, cols: usize) -> Self {
        Self {
            rows: (0..rows).map(|_| TableRow::empty(cols)).collect(),
            ..Self::new()
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Append an empty row sized to the current column count and return it.
    pub fn push_empty_row(&mut self) -> &mut TableRow {
        let cols = self.column_count();
        self.rows.push(TableRow::empty(cols));
        let last = self.rows.len() - 1;
        &mut self.rows[last]
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on first row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.cells.len()).unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get header rows.
    pub fn header(&self) -> &[TableRow] {
        let n = (self.header_rows as usize).min(self.rows.len());
        &self.rows[..n]
    }

    /// Get body rows (non-header).
    pub fn body(&self) -> &[TableRow] {
        let n = (self.header_rows as usize).min(self.rows.len());
        &self.rows[n..]
    }

    /// Table borders.
    pub fn borders(&self) -> &TableBorders {
        &self.properties.borders
    }

    /// Mutable table borders.
    pub fn borders_mut(&mut self) -> &mut TableBorders {
        &mut self.properties.borders
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,

    /// Whether this is a header row
    pub is_header: bool,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            is_header: false,
        }
    }

    /// Create a row of `cols` empty cells.
    pub fn empty(cols: usize) -> Self {
        Self::new(vec![TableCell::default(); cols])
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(TableCell::text).collect())
    }

    /// Cell texts in column order.
    pub fn texts(&self) -> Vec<&str> {
        self.cells.iter().map(|c| c.text.as_str()).collect()
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        self.texts().join("\t")
    }
}

/// A table cell holding plain text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell text
    pub text: String,
}

impl TableCell {
    /// Create a new cell with text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Replace the cell text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Table-level properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableProperties {
    /// Border lines for the edges and interior grid
    pub borders: TableBorders,
}

/// Border line style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    /// No border
    None,
    /// Single line
    #[default]
    Single,
    /// Thick line
    Thick,
    /// Double line
    Double,
    /// Dotted line
    Dotted,
    /// Dashed line
    Dashed,
}

impl BorderStyle {
    /// WordprocessingML `w:val` value.
    pub fn as_str(&self) -> &'static str {
        match self {
            BorderStyle::None => "none",
            BorderStyle::Single => "single",
            BorderStyle::Thick => "thick",
            BorderStyle::Double => "double",
            BorderStyle::Dotted => "dotted",
            BorderStyle::Dashed => "dashed",
        }
    }

    /// Parse a `w:val` value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "none" | "nil" => Some(BorderStyle::None),
            "single" => Some(BorderStyle::Single),
            "thick" => Some(BorderStyle::Thick),
            "double" => Some(BorderStyle::Double),
            "dotted" => Some(BorderStyle::Dotted),
            "dashed" => Some(BorderStyle::Dashed),
            _ => None,
        }
    }
}

/// A single border line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Border {
    /// Line style
    pub style: BorderStyle,
    /// Width in eighths of a point (4 = half a point)
    pub size: u32,
    /// Spacing from text in points
    pub space: u32,
    /// Hex RGB color without '#'
    pub color: String,
}

impl Default for Border {
    fn default() -> Self {
        Self {
            style: BorderStyle::Single,
            size: 4,
            space: 0,
            color: "000000".to_string(),
        }
    }
}

/// The six border positions of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderPosition {
    Top,
    Left,
    Bottom,
    Right,
    InsideH,
    InsideV,
}

impl BorderPosition {
    /// All positions in serialization order.
    pub const ALL: [BorderPosition; 6] = [
        BorderPosition::Top,
        BorderPosition::Left,
        BorderPosition::Bottom,
        BorderPosition::Right,
        BorderPosition::InsideH,
        BorderPosition::InsideV,
    ];

    /// WordprocessingML element name (without the `w:` prefix).
    pub fn element_name(&self) -> &'static str {
        match self {
            BorderPosition::Top => "top",
            BorderPosition::Left => "left",
            BorderPosition::Bottom => "bottom",
            BorderPosition::Right => "right",
            BorderPosition::InsideH => "insideH",
            BorderPosition::InsideV => "insideV",
        }
    }

    /// Look up a position by element name.
    pub fn from_element_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.element_name() == name)
    }
}

/// Table borders (all sides and interior lines).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableBorders {
    pub top: Option<Border>,
    pub left: Option<Border>,
    pub bottom: Option<Border>,
    pub right: Option<Border>,
    pub inside_h: Option<Border>,
    pub inside_v: Option<Border>,
}

impl TableBorders {
    /// Get the border at a position.
    pub fn get(&self, position: BorderPosition) -> Option<&Border> {
        match position {
            BorderPosition::Top => self.top.as_ref(),
            BorderPosition::Left => self.left.as_ref(),
            BorderPosition::Bottom => self.bottom.as_ref(),
            BorderPosition::Right => self.right.as_ref(),
            BorderPosition::InsideH => self.inside_h.as_ref(),
            BorderPosition::InsideV => self.inside_v.as_ref(),
        }
    }

    /// Set the border at a position.
    pub fn set(&mut self, position: BorderPosition, border: Border) {
        let slot = match position {
            BorderPosition::Top => &mut self.top,
            BorderPosition::Left => &mut self.left,
            BorderPosition::Bottom => &mut self.bottom,
            BorderPosition::Right => &mut self.right,
            BorderPosition::InsideH => &mut self.inside_h,
            BorderPosition::InsideV => &mut self.inside_v,
        };
        *slot = Some(border);
    }

    /// Iterate over the positions that have a border set.
    pub fn iter(&self) -> impl Iterator<Item = (BorderPosition, &Border)> {
        BorderPosition::ALL
            .into_iter()
            .filter_map(move |p| self.get(p).map(|b| (p, b)))
    }

    /// Check if no border is set.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}
