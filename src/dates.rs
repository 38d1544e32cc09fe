//! Lenient date decoding, canonical date encoding.
//!
//! speedrun.com emits dates in several shapes: full timestamps with and without
//! fractional seconds (`submitted`, `verify-date`, `signup`) and bare calendar
//! dates (`date`, `release-date`). Decoding tries each shape in a fixed order
//! and fails loudly when none matches. Encoding always writes RFC 3339 with a
//! `Z` designator.
//!
//! Use the module directly as a serde adapter:
//!
//! ```
//! use chrono::{DateTime, Utc};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Submission {
//!     #[serde(with = "srcom::dates")]
//!     submitted: DateTime<Utc>,
//!     #[serde(default, with = "srcom::dates::option")]
//!     verified: Option<DateTime<Utc>>,
//! }
//!
//! let s: Submission = serde_json::from_str(
//!     r#"{"submitted": "2021-06-15", "verified": "2021-06-16T08:00:00Z"}"#,
//! ).unwrap();
//! assert_eq!(s.submitted.to_rfc3339(), "2021-06-15T00:00:00+00:00");
//! assert!(s.verified.is_some());
//! ```

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// The date shapes accepted on the read side, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `2021-06-15T10:30:00.500Z`, `2021-06-15T10:30:00.5+02:00`
    DateTimeFractional,
    /// `2021-06-15T10:30:00Z`, `2021-06-15T10:30:00-05:00`
    DateTime,
    /// `2021-06-15`, taken as midnight UTC
    Date,
}

impl DateFormat {
    /// Every accepted format, highest priority first.
    pub const PRIORITY: [DateFormat; 3] = [
        DateFormat::DateTimeFractional,
        DateFormat::DateTime,
        DateFormat::Date,
    ];

    fn parse(self, value: &str) -> Option<DateTime<Utc>> {
        match self {
            DateFormat::DateTimeFractional if has_fraction(value) => parse_rfc3339(value),
            DateFormat::DateTime if !has_fraction(value) => parse_rfc3339(value),
            DateFormat::Date => NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()?
                .and_hms_opt(0, 0, 0)
                .map(|midnight| midnight.and_utc()),
            _ => None,
        }
    }
}

/// A date string matched none of the accepted formats.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("date string does not match any expected format: {0:?}")]
pub struct DateParseError(pub String);

/// Parses `value` with the first matching [`DateFormat`].
///
/// # Examples
///
/// ```
/// use srcom::dates::{parse, DateFormat};
///
/// let (_, format) = parse("2021-06-15T10:30:00.500Z").unwrap();
/// assert_eq!(format, DateFormat::DateTimeFractional);
///
/// let (_, format) = parse("2021-06-15").unwrap();
/// assert_eq!(format, DateFormat::Date);
///
/// assert!(parse("15/06/2021").is_err());
/// ```
pub fn parse(value: &str) -> Result<(DateTime<Utc>, DateFormat), DateParseError> {
    DateFormat::PRIORITY
        .iter()
        .find_map(|format| format.parse(value).map(|date| (date, *format)))
        .ok_or_else(|| DateParseError(value.to_string()))
}

/// Renders `date` in the canonical write format, e.g. `2021-06-15T10:30:00Z`.
pub fn format(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Renders only the calendar part, e.g. `2021-06-15`. Used for query filters.
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn has_fraction(value: &str) -> bool {
    value
        .split_once(['T', 't'])
        .is_some_and(|(_, time)| time.contains('.'))
}

fn parse_rfc3339(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

/// Serde `deserialize_with` half of the adapter.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw)
        .map(|(date, _)| date)
        .map_err(serde::de::Error::custom)
}

/// Serde `serialize_with` half of the adapter.
pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(date))
}

/// Adapter for optional date fields. `null` and missing both decode to `None`
/// (pair with `#[serde(default)]`).
pub mod option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => super::parse(&raw)
                .map(|(date, _)| Some(date))
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }

    pub fn serialize<S>(date: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_str(&super::format(date)),
            None => serializer.serialize_none(),
        }
    }
}
