//! Extraction options and configuration.

/// Default pattern for the name field: rest of the line after the label.
pub const NAME_PATTERN: &str = r"Name: (.+)";

/// Default pattern for the age field: decimal digits after the label.
pub const AGE_PATTERN: &str = r"Age: (\d+)";

/// Default pattern for the email field.
///
/// Deliberately loose: anything, `@`, anything, a dot, anything. It accepts
/// malformed addresses and stops only at the end of the line.
pub const EMAIL_PATTERN: &str = r"Email: (.+@.+\..+)";

/// Regular expression sources for the three record fields.
///
/// Each pattern must contain a capture group; group 1 is the field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPatterns {
    pub name: String,
    pub age: String,
    pub email: String,
}

impl FieldPatterns {
    /// Patterns anchored to line boundaries.
    ///
    /// A label only counts when it starts a line, so text such as
    /// `Full Name: x` or `Contact Email: y` is not picked up.
    pub fn anchored() -> Self {
        Self {
            name: r"(?m)^Name: (.+)$".to_string(),
            age: r"(?m)^Age: (\d+)$".to_string(),
            email: r"(?m)^Email: (.+@.+\..+)$".to_string(),
        }
    }

    /// Replace the name pattern.
    pub fn with_name(mut self, pattern: impl Into<String>) -> Self {
        self.name = pattern.into();
        self
    }

    /// Replace the age pattern.
    pub fn with_age(mut self, pattern: impl Into<String>) -> Self {
        self.age = pattern.into();
        self
    }

    /// Replace the email pattern.
    pub fn with_email(mut self, pattern: impl Into<String>) -> Self {
        self.email = pattern.into();
        self
    }
}

impl Default for FieldPatterns {
    fn default() -> Self {
        Self {
            name: NAME_PATTERN.to_string(),
            age: AGE_PATTERN.to_string(),
            email: EMAIL_PATTERN.to_string(),
        }
    }
}

/// How the three match sequences are combined into records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PairingMode {
    /// Zip positionally, dropping extras beyond the shortest sequence
    #[default]
    Truncate,
    /// Fail unless all three sequences have the same length
    Strict,
}

/// Options for extracting records.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Field patterns
    pub patterns: FieldPatterns,

    /// Pairing behavior for unequal match counts
    pub pairing: PairingMode,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field patterns.
    pub fn with_patterns(mut self, patterns: FieldPatterns) -> Self {
        self.patterns = patterns;
        self
    }

    /// Use line-anchored patterns.
    pub fn anchored(mut self) -> Self {
        self.patterns = FieldPatterns::anchored();
        self
    }

    /// Set pairing mode.
    pub fn with_pairing(mut self, pairing: PairingMode) -> Self {
        self.pairing = pairing;
        self
    }

    /// Fail on mismatched field counts.
    pub fn strict(mut self) -> Self {
        self.pairing = PairingMode::Strict;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_options_builder() {
        let options = ExtractOptions::new().anchored().strict();

        assert_eq!(options.pairing, PairingMode::Strict);
        assert_eq!(options.patterns, FieldPatterns::anchored());
    }

    #[test]
    fn test_default_options() {
        let options = ExtractOptions::default();
        assert_eq!(options.pairing, PairingMode::Truncate);
        assert_eq!(options.patterns.name, NAME_PATTERN);
        assert_eq!(options.patterns.age, AGE_PATTERN);
        assert_eq!(options.patterns.email, EMAIL_PATTERN);
    }

    #[test]
    fn test_field_pattern_overrides() {
        let patterns = FieldPatterns::default().with_age(r"Years: (\d+)");
        assert_eq!(patterns.age, r"Years: (\d+)");
        assert_eq!(patterns.name, NAME_PATTERN);
    }
}
