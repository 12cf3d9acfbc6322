use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use crate::core::LocateError;

/// Letter, digit, letter, optional space, digit, letter, digit; any case
static POSTAL_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][0-9][A-Za-z]) ?([0-9][A-Za-z][0-9])$").expect("postal code pattern is valid")
});

/// Check whether a string is a well-formed Canadian postal code
#[inline]
pub fn validate_postal_code(raw: &str) -> bool {
    POSTAL_CODE.is_match(raw)
}

/// A validated Canadian postal code, normalized to `A1A 1A1`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostalCode(String);

impl PostalCode {
    /// Validate and normalize raw user input
    pub fn parse(raw: &str) -> Result<Self, LocateError> {
        let captures = POSTAL_CODE
            .captures(raw)
            .ok_or_else(|| LocateError::InvalidFormat(raw.to_string()))?;

        Ok(Self(format!(
            "{} {}",
            captures[1].to_ascii_uppercase(),
            captures[2].to_ascii_uppercase()
        )))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
