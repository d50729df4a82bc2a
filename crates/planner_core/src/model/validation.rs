//! Field-level validation shared by drafts, patches and registration input.
//!
//! # Invariants
//! - Validation runs before any store mutation; a failing check never leaves
//!   a partially applied record behind.
//! - Error values carry field names only, never user-entered text.

use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Wire format for a service time of day.
pub const TIME_OF_DAY_FORMAT: &str = "%H:%M";
/// Wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation failure reported to the caller before any mutation happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text field is empty after trim.
    BlankField {
        entity: &'static str,
        field: &'static str,
    },
    /// Email does not look like `local@domain.tld`.
    InvalidEmail { entity: &'static str },
    /// Tempo must be a positive BPM value.
    ZeroTempo,
    /// Musical key label is not one of the 12 pitch classes.
    UnknownKey(String),
    /// Calendar date is not `YYYY-MM-DD`.
    InvalidDate(String),
    /// Time of day is not `HH:MM`.
    InvalidTime(String),
    /// A custom block carries a song reference.
    SongReferenceOnCustomBlock,
    /// Two blocks inside one service share an id.
    DuplicateBlockId,
    /// Block `order` values are not exactly `1..=N`.
    BrokenBlockOrder,
    /// Registration password and confirmation differ.
    PasswordMismatch,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField { entity, field } => {
                write!(f, "{entity} {field} must not be blank")
            }
            Self::InvalidEmail { entity } => write!(f, "{entity} email is not a valid address"),
            Self::ZeroTempo => write!(f, "song tempo must be a positive BPM value"),
            Self::UnknownKey(value) => write!(f, "unknown musical key `{value}`"),
            Self::InvalidDate(value) => {
                write!(f, "invalid date `{value}`; expected YYYY-MM-DD")
            }
            Self::InvalidTime(value) => write!(f, "invalid time `{value}`; expected HH:MM"),
            Self::SongReferenceOnCustomBlock => {
                write!(f, "custom blocks cannot reference a song")
            }
            Self::DuplicateBlockId => write!(f, "service contains duplicate block ids"),
            Self::BrokenBlockOrder => {
                write!(f, "service block order must be contiguous from 1")
            }
            Self::PasswordMismatch => write!(f, "password confirmation does not match"),
        }
    }
}

impl Error for ValidationError {}

/// Rejects values that are empty after trim.
pub fn require_text(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField { entity, field });
    }
    Ok(())
}

/// Rejects blank or malformed email addresses.
pub fn require_email(entity: &'static str, value: &str) -> Result<(), ValidationError> {
    require_text(entity, "email", value)?;
    if !EMAIL_RE.is_match(value.trim()) {
        return Err(ValidationError::InvalidEmail { entity });
    }
    Ok(())
}

/// Parses a `YYYY-MM-DD` form value into a calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::BlankField {
            entity: "service",
            field: "date",
        });
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(trimmed.to_string()))
}

/// Parses an `HH:MM` form value into a time of day.
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::BlankField {
            entity: "service",
            field: "time",
        });
    }
    NaiveTime::parse_from_str(trimmed, TIME_OF_DAY_FORMAT)
        .map_err(|_| ValidationError::InvalidTime(trimmed.to_string()))
}

/// Serde adapter storing `NaiveTime` as `HH:MM`.
pub(crate) mod time_of_day {
    use super::TIME_OF_DAY_FORMAT;
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(TIME_OF_DAY_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, TIME_OF_DAY_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_date, parse_time_of_day, require_email, require_text, ValidationError};

    #[test]
    fn require_text_rejects_whitespace_only() {
        let err = require_text("song", "title", "   ").unwrap_err();
        assert_eq!(
            err,
            ValidationError::BlankField {
                entity: "song",
                field: "title"
            }
        );
    }

    #[test]
    fn require_email_accepts_plain_address_and_rejects_garbage() {
        require_email("volunteer", "ann@x.com").unwrap();
        let err = require_email("volunteer", "not-an-email").unwrap_err();
        assert_eq!(err, ValidationError::InvalidEmail { entity: "volunteer" });
    }

    #[test]
    fn parse_date_reports_missing_and_malformed_values() {
        assert!(matches!(
            parse_date(""),
            Err(ValidationError::BlankField { field: "date", .. })
        ));
        assert!(matches!(
            parse_date("21/01/2024"),
            Err(ValidationError::InvalidDate(_))
        ));
        assert_eq!(parse_date("2024-01-21").unwrap().to_string(), "2024-01-21");
    }

    #[test]
    fn parse_time_of_day_uses_hour_minute_format() {
        let time = parse_time_of_day("10:00").unwrap();
        assert_eq!(time.format("%H:%M").to_string(), "10:00");
        assert!(matches!(
            parse_time_of_day("25:99"),
            Err(ValidationError::InvalidTime(_))
        ));
    }
}
