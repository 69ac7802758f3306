//! Table styling.
//!
//! Border configuration goes through [`TableStyler`] so the writer never
//! touches the table's property tree directly.

use crate::model::{Border, BorderPosition, Table};

/// Mutates a table's style metadata in place.
pub trait TableStyler: Send + Sync {
    /// Apply this styler to the table.
    fn apply(&self, table: &mut Table);

    /// Short name used in log output.
    fn name(&self) -> &str {
        "custom"
    }
}

/// Applies the same border to all six border positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniformBorders {
    border: Border,
}

impl UniformBorders {
    /// Create a styler using the given border for every position.
    pub fn new(border: Border) -> Self {
        Self { border }
    }

    /// The border this styler applies.
    pub fn border(&self) -> &Border {
        &self.border
    }
}

impl TableStyler for UniformBorders {
    fn apply(&self, table: &mut Table) {
        let borders = table.borders_mut();
        for position in BorderPosition::ALL {
            borders.set(position, self.border.clone());
        }
    }

    fn name(&self) -> &str {
        "uniform-borders"
    }
}

/// Set single, 4-eighth-point, black borders on every edge and grid line.
pub fn apply_borders(table: &mut Table) {
    UniformBorders::default().apply(table);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BorderStyle;

    #[test]
    fn test_apply_borders_sets_all_positions() {
        let mut table = Table::with_size(1, 3);
        apply_borders(&mut table);

        for position in BorderPosition::ALL {
            let border = table.borders().get(position).unwrap();
            assert_eq!(border.style, BorderStyle::Single);
            assert_eq!(border.size, 4);
            assert_eq!(border.space, 0);
            assert_eq!(border.color, "000000");
        }
    }

    #[test]
    fn test_apply_borders_leaves_cells_alone() {
        let mut table = Table::with_size(2, 3);
        table.rows[0].cells[0].set_text("Name");
        let before = table.rows.clone();
        apply_borders(&mut table);
        assert_eq!(table.rows, before);
    }

    #[test]
    fn test_custom_uniform_border() {
        let styler = UniformBorders::new(Border {
            style: BorderStyle::Double,
            size: 12,
            space: 0,
            color: "FF0000".to_string(),
        });
        let mut table = Table::with_size(1, 1);
        styler.apply(&mut table);

        assert_eq!(table.borders().iter().count(), 6);
        assert!(table
            .borders()
            .iter()
            .all(|(_, b)| b.style == BorderStyle::Double && b.color == "FF0000"));
        assert_eq!(styler.name(), "uniform-borders");
    }

    #[test]
    fn test_apply_twice_is_stable() {
        let mut table = Table::with_size(1, 3);
        apply_borders(&mut table);
        let first = table.borders().clone();
        apply_borders(&mut table);
        assert_eq!(table.borders(), &first);
    }
}
