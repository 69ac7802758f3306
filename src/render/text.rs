//! Plain text rendering for extracted records.

use crate::model::RecordSet;

use super::options::DEFAULT_COLUMNS;

/// Render records as tab-separated lines under a `Name\tAge\tEmail` header.
pub fn to_text(records: &RecordSet) -> String {
    let mut output = DEFAULT_COLUMNS.join("\t");
    for record in records {
        output.push('\n');
        output.push_str(&record.fields().join("\t"));
    }
    output
}
