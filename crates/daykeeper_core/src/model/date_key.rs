//! Calendar-day identifier model.
//!
//! # Responsibility
//! - Define the canonical `YYYY-MM-DD` day key derived from local wall-clock
//!   time.
//! - Guarantee that string ordering of keys equals calendar ordering.
//!
//! # Invariants
//! - Every constructed key renders as a zero-padded `YYYY-MM-DD` string.
//! - `DateKey` ordering matches both calendar order and lexicographic order
//!   of the rendered form.
//! - Parsing rejects non-canonical forms (missing padding, extra text,
//!   impossible dates).

use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};

static DATE_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date key regex"));

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Identifies one calendar day in the device's local time zone.
///
/// Keys are persisted in their rendered string form; the zero-padded layout
/// makes stored maps sort chronologically without extra bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

/// Parse failure for a would-be date key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateKeyError {
    /// Input does not match the canonical `YYYY-MM-DD` layout.
    NonCanonical(String),
    /// Input matches the layout but is not a real calendar date.
    InvalidDate(String),
}

impl Display for DateKeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonCanonical(value) => {
                write!(f, "date key `{value}` is not in canonical YYYY-MM-DD form")
            }
            Self::InvalidDate(value) => {
                write!(f, "date key `{value}` is not a valid calendar date")
            }
        }
    }
}

impl Error for DateKeyError {}

impl DateKey {
    /// Returns the key for the current day, using local wall-clock time.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Wraps an already-resolved calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parses a canonical `YYYY-MM-DD` key.
    ///
    /// The layout is checked before the calendar parse so that unpadded
    /// inputs (e.g. `2026-8-7`) are rejected even where the date parser
    /// would accept them.
    pub fn parse(value: &str) -> Result<Self, DateKeyError> {
        if !DATE_KEY_RE.is_match(value) {
            return Err(DateKeyError::NonCanonical(value.to_string()));
        }
        NaiveDate::parse_from_str(value, DATE_KEY_FORMAT)
            .map(Self)
            .map_err(|_| DateKeyError::InvalidDate(value.to_string()))
    }

    /// Returns the underlying calendar date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Renders the `DD/MM/YYYY` form used for human-facing labels.
    pub fn display_date(&self) -> String {
        self.0.format("%d/%m/%Y").to_string()
    }

    /// Calendar year of this key.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Calendar month (1-12) of this key.
    pub fn month(&self) -> u32 {
        self.0.month()
    }
}

impl Display for DateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DateKeyVisitor;

        impl Visitor<'_> for DateKeyVisitor {
            type Value = DateKey;

            fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str("a YYYY-MM-DD date key string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<DateKey, E> {
                DateKey::parse(value).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(DateKeyVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::{DateKey, DateKeyError};

    #[test]
    fn renders_zero_padded_components() {
        let key = DateKey::parse("2026-03-05").unwrap();
        assert_eq!(key.to_string(), "2026-03-05");
    }

    #[test]
    fn string_order_matches_calendar_order() {
        let earlier = DateKey::parse("2025-12-31").unwrap();
        let later = DateKey::parse("2026-01-01").unwrap();
        assert!(earlier < later);
        assert!(earlier.to_string() < later.to_string());

        let padded = DateKey::parse("2026-02-09").unwrap();
        let after = DateKey::parse("2026-02-10").unwrap();
        assert!(padded < after);
        assert!(padded.to_string() < after.to_string());
    }

    #[test]
    fn parse_rejects_unpadded_and_impossible_dates() {
        assert!(matches!(
            DateKey::parse("2026-8-7"),
            Err(DateKeyError::NonCanonical(_))
        ));
        assert!(matches!(
            DateKey::parse("2026-08-07T00:00"),
            Err(DateKeyError::NonCanonical(_))
        ));
        assert!(matches!(
            DateKey::parse("2026-02-30"),
            Err(DateKeyError::InvalidDate(_))
        ));
    }

    #[test]
    fn serde_roundtrips_as_plain_string() {
        let key = DateKey::parse("2026-08-07").unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"2026-08-07\"");
        let back: DateKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn serde_rejects_malformed_keys() {
        assert!(serde_json::from_str::<DateKey>("\"not-a-date\"").is_err());
    }
}
