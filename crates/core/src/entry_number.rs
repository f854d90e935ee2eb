//! Entry identifiers.
//!
//! Entries are numbered `1..=7999`. Numbers below 100 are written with
//! three digits (`SCP-002`), which is also how the wiki names its pages
//! and how archived copies are named on disk.

use std::fmt;
use std::sync::OnceLock;

use rand::Rng;
use regex::Regex;
use serde::Serialize;

use crate::{Result, ScpError};

/// Highest entry number published on the wiki.
pub const MAX_ENTRY_NUMBER: u32 = 7999;

/// Default location of entry pages.
pub const DEFAULT_BASE_URL: &str = "https://scp-wiki.wikidot.com";

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)SCP-(\d+)").expect("entry number pattern is valid"))
}

/// Finds the first `SCP-<digits>` occurrence (case-insensitive) and returns the digits.
///
/// ```rust
/// use scp_reader_core::extract_number;
///
/// assert_eq!(extract_number("foo SCP-012 bar"), Some(12));
/// assert_eq!(extract_number("no identifier here"), None);
/// ```
pub fn extract_number(text: &str) -> Option<u32> {
    number_pattern()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
}

/// A validated entry number in `1..=MAX_ENTRY_NUMBER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EntryNumber(u32);

impl EntryNumber {
    /// Validates `number` against the published range.
    pub fn new(number: u32) -> Result<Self> {
        if (1..=MAX_ENTRY_NUMBER).contains(&number) {
            Ok(Self(number))
        } else {
            Err(ScpError::InvalidNumber { number, max: MAX_ENTRY_NUMBER })
        }
    }

    /// Picks a uniformly random entry number.
    pub fn random() -> Self {
        Self(rand::rng().random_range(1..=MAX_ENTRY_NUMBER))
    }

    /// Reads the first identifier found in `text`, if it is in range.
    pub fn find_in(text: &str) -> Option<Self> {
        extract_number(text).and_then(|n| Self::new(n).ok())
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Zero-padded to at least three digits.
    pub fn padded(self) -> String {
        format!("{:03}", self.0)
    }

    /// Archive file name, e.g. `SCP-049.txt`.
    pub fn file_name(self) -> String {
        format!("SCP-{}.txt", self.padded())
    }

    /// Wiki page URL under `base_url`.
    pub fn url(self, base_url: &str) -> String {
        format!("{}/scp-{}", base_url.trim_end_matches('/'), self.padded())
    }
}

impl fmt::Display for EntryNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SCP-{}", self.padded())
    }
}

impl TryFrom<u32> for EntryNumber {
    type Error = ScpError;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("foo SCP-012 bar", Some(12))]
    #[case("scp-7999", Some(7999))]
    #[case("Item #: SCP-173\nObject Class: Euclid", Some(173))]
    #[case("SCP-002 then SCP-003", Some(2))]
    #[case("no identifier here", None)]
    #[case("SCP-", None)]
    #[case("SCP-99999999999999999999", None)]
    fn test_extract_number(#[case] input: &str, #[case] expected: Option<u32>) {
        assert_eq!(extract_number(input), expected);
    }

    #[rstest]
    #[case(1, "001")]
    #[case(49, "049")]
    #[case(100, "100")]
    #[case(7999, "7999")]
    fn test_padded(#[case] number: u32, #[case] expected: &str) {
        assert_eq!(EntryNumber::new(number).unwrap().padded(), expected);
    }

    #[test]
    fn test_range_validation() {
        assert!(matches!(EntryNumber::new(0), Err(ScpError::InvalidNumber { number: 0, .. })));
        assert!(EntryNumber::new(8000).is_err());
        assert!(EntryNumber::try_from(173).is_ok());
    }

    #[test]
    fn test_file_name_and_url() {
        let number = EntryNumber::new(49).unwrap();
        assert_eq!(number.file_name(), "SCP-049.txt");
        assert_eq!(number.url(DEFAULT_BASE_URL), "https://scp-wiki.wikidot.com/scp-049");
        assert_eq!(number.url("http://localhost:8080/"), "http://localhost:8080/scp-049");
        assert_eq!(number.to_string(), "SCP-049");
    }

    #[test]
    fn test_random_in_range() {
        for _ in 0..100 {
            let n = EntryNumber::random().get();
            assert!((1..=MAX_ENTRY_NUMBER).contains(&n));
        }
    }

    #[test]
    fn test_find_in_rejects_out_of_range() {
        assert_eq!(EntryNumber::find_in("SCP-9000"), None);
        assert_eq!(EntryNumber::find_in("see scp-096").map(EntryNumber::get), Some(96));
    }
}
