//! Regex-based record extractor.

use std::borrow::Cow;
use std::io::Read;
use std::path::Path;

use regex::Regex;

use crate::error::{Error, Result};
use crate::model::{MatchCounts, Record, RecordSet};

use super::options::{ExtractOptions, PairingMode};

/// Extracts Name/Age/Email records from loosely structured text.
///
/// The three fields are matched independently over the whole input and then
/// paired by position. Nothing checks that match *i* of each field came from
/// the same logical entry; inputs are expected to list one `Name:`, `Age:`
/// and `Email:` line per entry in a consistent order.
#[derive(Debug, Clone)]
pub struct Extractor {
    name: Regex,
    age: Regex,
    email: Regex,
    pairing: PairingMode,
}

impl Extractor {
    /// Create an extractor with the default patterns.
    pub fn new() -> Result<Self> {
        Self::with_options(ExtractOptions::default())
    }

    /// Create an extractor with custom options.
    pub fn with_options(options: ExtractOptions) -> Result<Self> {
        let patterns = &options.patterns;
        Ok(Self {
            name: compile("name", &patterns.name)?,
            age: compile("age", &patterns.age)?,
            email: compile("email", &patterns.email)?,
            pairing: options.pairing,
        })
    }

    /// Read a text file in full and extract its records.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<RecordSet> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        log::debug!("Read {} bytes from {}", content.len(), path.display());
        self.extract_str(&content)
    }

    /// Read everything from a reader and extract its records.
    pub fn extract_reader<R: Read>(&self, mut reader: R) -> Result<RecordSet> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        self.extract_str(&content)
    }

    /// Extract records from text already in memory.
    pub fn extract_str(&self, content: &str) -> Result<RecordSet> {
        let content = normalize_newlines(content);

        let names = captures(&self.name, &content);
        let ages = captures(&self.age, &content);
        let emails = captures(&self.email, &content);

        let counts = MatchCounts {
            names: names.len(),
            ages: ages.len(),
            emails: emails.len(),
        };
        log::debug!(
            "Matched {} names, {} ages, {} emails",
            counts.names,
            counts.ages,
            counts.emails
        );

        if !counts.is_balanced() {
            match self.pairing {
                PairingMode::Strict => {
                    return Err(Error::CountMismatch {
                        names: counts.names,
                        ages: counts.ages,
                        emails: counts.emails,
                    });
                }
                PairingMode::Truncate => log::warn!(
                    "Field counts differ ({} names, {} ages, {} emails); keeping {} records, dropping {} values",
                    counts.names,
                    counts.ages,
                    counts.emails,
                    counts.paired(),
                    counts.dropped()
                ),
            }
        }

        let records = names
            .into_iter()
            .zip(ages)
            .zip(emails)
            .map(|((name, age), email)| Record::new(name, age, email))
            .collect();

        Ok(RecordSet { records, counts })
    }
}

fn compile(field: &str, pattern: &str) -> Result<Regex> {
    let regex =
        Regex::new(pattern).map_err(|e| Error::Pattern(format!("{} pattern: {}", field, e)))?;
    if regex.captures_len() < 2 {
        return Err(Error::Pattern(format!(
            "{} pattern has no capture group: {}",
            field, pattern
        )));
    }
    Ok(regex)
}

/// Group 1 of every non-overlapping match, in scan order.
fn captures(regex: &Regex, content: &str) -> Vec<String> {
    regex
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Text-mode reading: `\r\n` and lone `\r` both become `\n`.
fn normalize_newlines(content: &str) -> Cow<'_, str> {
    if content.contains('\r') {
        Cow::Owned(content.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::FieldPatterns;

    const TWO_PEOPLE: &str = "Name: Ada Lovelace\nAge: 36\nEmail: ada@example.com\n\
                              Name: Alan Turing\nAge: 41\nEmail: alan@example.org\n";

    #[test]
    fn test_extract_well_formed() {
        let extractor = Extractor::new().unwrap();
        let set = extractor.extract_str(TWO_PEOPLE).unwrap();

        assert_eq!(
            set.records,
            vec![
                Record::new("Ada Lovelace", "36", "ada@example.com"),
                Record::new("Alan Turing", "41", "alan@example.org"),
            ]
        );
        assert!(!set.is_truncated());
    }

    #[test]
    fn test_extract_truncates_to_shortest() {
        let input = "Name: A\nAge: 1\nEmail: a@x.io\n\
                     Name: B\nEmail: b@x.io\n\
                     Name: C\nAge: 3\nEmail: c@x.io\n";
        let set = Extractor::new().unwrap().extract_str(input).unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.counts, MatchCounts { names: 3, ages: 2, emails: 3 });
        // Positional pairing: the second age belongs to C but lands on B.
        assert_eq!(set.records[1], Record::new("B", "3", "b@x.io"));
        assert!(set.is_truncated());
    }

    #[test]
    fn test_extract_strict_rejects_mismatch() {
        let input = "Name: A\nName: B\nAge: 1\nEmail: a@x.io\nEmail: b@x.io\n";
        let extractor = Extractor::with_options(ExtractOptions::new().strict()).unwrap();
        let err = extractor.extract_str(input).unwrap_err();

        assert!(matches!(
            err,
            Error::CountMismatch {
                names: 2,
                ages: 1,
                emails: 2
            }
        ));
    }

    #[test]
    fn test_extract_no_matches() {
        let set = Extractor::new()
            .unwrap()
            .extract_str("nothing to see here\n")
            .unwrap();
        assert!(set.is_empty());
        assert_eq!(set.counts, MatchCounts::default());
    }

    #[test]
    fn test_extract_empty_input() {
        let set = Extractor::new().unwrap().extract_str("").unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_crlf_does_not_leak_into_fields() {
        let input = "Name: Grace Hopper\r\nAge: 85\r\nEmail: grace@navy.mil\r\n";
        let set = Extractor::new().unwrap().extract_str(input).unwrap();
        assert_eq!(set.records[0], Record::new("Grace Hopper", "85", "grace@navy.mil"));
    }

    #[test]
    fn test_age_keeps_original_text() {
        let input = "Name: Z\nAge: 007\nEmail: z@x.io\n";
        let set = Extractor::new().unwrap().extract_str(input).unwrap();
        assert_eq!(set.records[0].age, "007");
    }

    #[test]
    fn test_age_requires_digits() {
        let input = "Name: Z\nAge: unknown\nEmail: z@x.io\n";
        let set = Extractor::new().unwrap().extract_str(input).unwrap();
        assert_eq!(set.counts.ages, 0);
        assert!(set.is_empty());
    }

    #[test]
    fn test_loose_email_accepts_malformed() {
        let input = "Name: Q\nAge: 9\nEmail: not really@an address.x y\n";
        let set = Extractor::new().unwrap().extract_str(input).unwrap();
        assert_eq!(set.records[0].email, "not really@an address.x y");
    }

    #[test]
    fn test_email_without_dot_is_skipped() {
        let input = "Email: root@localhost\n";
        let set = Extractor::new().unwrap().extract_str(input).unwrap();
        assert_eq!(set.counts.emails, 0);
    }

    #[test]
    fn test_default_patterns_match_mid_line_labels() {
        let input = "Full Name: Bob\nName: Robert\nAge: 50\nEmail: r@x.io\n";
        let set = Extractor::new().unwrap().extract_str(input).unwrap();
        assert_eq!(set.counts.names, 2);
        assert_eq!(set.records[0].name, "Bob");
    }

    #[test]
    fn test_anchored_patterns_ignore_mid_line_labels() {
        let input = "Full Name: Bob\nName: Robert\nAge: 50\nEmail: r@x.io\n";
        let extractor = Extractor::with_options(ExtractOptions::new().anchored()).unwrap();
        let set = extractor.extract_str(input).unwrap();
        assert_eq!(set.counts.names, 1);
        assert_eq!(set.records[0].name, "Robert");
    }

    #[test]
    fn test_invalid_pattern() {
        let options =
            ExtractOptions::new().with_patterns(FieldPatterns::default().with_name("Name: (.+"));
        let err = Extractor::with_options(options).unwrap_err();
        assert!(matches!(err, Error::Pattern(_)));
    }

    #[test]
    fn test_pattern_without_group() {
        let options =
            ExtractOptions::new().with_patterns(FieldPatterns::default().with_age(r"Age: \d+"));
        let err = Extractor::with_options(options).unwrap_err();
        assert!(err.to_string().contains("no capture group"));
    }

    #[test]
    fn test_extract_reader() {
        let set = Extractor::new()
            .unwrap()
            .extract_reader(TWO_PEOPLE.as_bytes())
            .unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_extract_missing_file() {
        let err = Extractor::new()
            .unwrap()
            .extract_file("definitely/not/here.txt")
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
