//! Extracted record types.

use serde::{Deserialize, Serialize};

/// One (name, age, email) triple recovered from the input text.
///
/// All fields keep the exact matched text. The age is not converted to a
/// number so leading zeros and very long digit runs survive unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Text following the `Name: ` label
    pub name: String,

    /// Digits following the `Age: ` label
    pub age: String,

    /// Text following the `Email: ` label
    pub email: String,
}

impl Record {
    /// Create a new record.
    pub fn new(name: impl Into<String>, age: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age: age.into(),
            email: email.into(),
        }
    }

    /// Fields in column order (name, age, email).
    pub fn fields(&self) -> [&str; 3] {
        [&self.name, &self.age, &self.email]
    }
}

impl<N, A, E> From<(N, A, E)> for Record
where
    N: Into<String>,
    A: Into<String>,
    E: Into<String>,
{
    fn from((name, age, email): (N, A, E)) -> Self {
        Self::new(name, age, email)
    }
}

/// How many matches each field pattern produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCounts {
    pub names: usize,
    pub ages: usize,
    pub emails: usize,
}

impl MatchCounts {
    /// Number of complete records that positional pairing can build.
    pub fn paired(&self) -> usize {
        self.names.min(self.ages).min(self.emails)
    }

    /// Whether every field matched the same number of times.
    pub fn is_balanced(&self) -> bool {
        self.names == self.ages && self.ages == self.emails
    }

    /// Total matches discarded by truncating to the shortest sequence.
    pub fn dropped(&self) -> usize {
        let paired = self.paired();
        (self.names - paired) + (self.ages - paired) + (self.emails - paired)
    }
}

/// Ordered records extracted from one input, in scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    /// Paired records
    pub records: Vec<Record>,

    /// Raw per-field match counts before pairing
    pub counts: MatchCounts,
}

impl RecordSet {
    /// Create a record set from already-paired records.
    pub fn new(records: Vec<Record>) -> Self {
        let n = records.len();
        Self {
            records,
            counts: MatchCounts {
                names: n,
                ages: n,
                emails: n,
            },
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no records were extracted.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Borrow the records as a slice.
    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }

    /// Whether pairing dropped any unmatched field values.
    pub fn is_truncated(&self) -> bool {
        !self.counts.is_balanced()
    }
}

impl IntoIterator for RecordSet {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl std::ops::Deref for RecordSet {
    type Target = [Record];

    fn deref(&self) -> &[Record] {
        &self.records
    }
}
