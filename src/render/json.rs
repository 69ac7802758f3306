//! JSON rendering for extracted records.

use crate::error::{Error, Result};
use crate::model::RecordSet;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a record set to JSON.
pub fn to_json(records: &RecordSet, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(records),
        JsonFormat::Compact => serde_json::to_string(records),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
