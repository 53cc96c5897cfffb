use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use thiserror::Error;

/// Calendar date pattern, e.g. `2024-01-10`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Timestamp pattern, e.g. `2024-01-10 14:03:59`. Matches SQLite's `CURRENT_TIMESTAMP`.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeFormatError {
    #[error("no time string passed")]
    Empty,

    #[error("time `{text}` is not in the {expected} format")]
    Malformed { text: String, expected: &'static str },
}

fn pattern(date_only: bool) -> (&'static str, &'static str) {
    if date_only {
        (DATE_FORMAT, "YYYY-MM-DD")
    } else {
        (DATE_TIME_FORMAT, "YYYY-MM-DD HH:MM:SS")
    }
}

/// Byte-level shape of each pattern: `d` is an ASCII digit, anything else is literal.
/// chrono alone accepts unpadded fields, signs and leading whitespace.
fn has_shape(text: &str, date_only: bool) -> bool {
    let shape: &[u8] = if date_only {
        b"dddd-dd-dd"
    } else {
        b"dddd-dd-dd dd:dd:dd"
    };
    text.len() == shape.len()
        && text.bytes().zip(shape).all(|(byte, &expected)| match expected {
            b'd' => byte.is_ascii_digit(),
            literal => byte == literal,
        })
}

/// Parse either pattern into an instant. Date-only input lands on midnight.
pub fn parse(text: &str, date_only: bool) -> Result<NaiveDateTime, TimeFormatError> {
    if text.is_empty() {
        return Err(TimeFormatError::Empty);
    }
    let (format, name) = pattern(date_only);
    let malformed = || TimeFormatError::Malformed {
        text: text.to_string(),
        expected: name,
    };
    if !has_shape(text, date_only) {
        return Err(malformed());
    }
    let parsed = if date_only {
        NaiveDate::parse_from_str(text, format).map(|date| date.and_time(NaiveTime::MIN))
    } else {
        NaiveDateTime::parse_from_str(text, format)
    };
    parsed.map_err(|_| malformed())
}

/// Render an instant with the date-only or the date-time pattern.
pub fn format(instant: &NaiveDateTime, date_only: bool) -> String {
    instant.format(pattern(date_only).0).to_string()
}

pub fn parse_date(text: &str) -> Result<NaiveDate, TimeFormatError> {
    parse(text, true).map(|instant| instant.date())
}

pub fn parse_date_time(text: &str) -> Result<NaiveDateTime, TimeFormatError> {
    parse(text, false)
}

pub fn format_date(date: &NaiveDate) -> String {
    format(&date.and_time(NaiveTime::MIN), true)
}

pub fn format_date_time(instant: &NaiveDateTime) -> String {
    format(instant, false)
}

/// Today's date on the local calendar, the default for `applied_at`.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Current UTC time truncated to whole seconds, the resolution the store keeps.
pub fn now() -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    // Round-trips through the stored text form.
    parse_date_time(&format_date_time(&now)).unwrap_or(now)
}

/// Serde adapters that write dates and stamps in the fixed text patterns.
pub mod serde_format {
    use super::*;
    use serde::{Deserialize, Deserializer, Serializer};

    pub mod date {
        use super::*;

        pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&format_date(date))
        }
    }

    pub mod date_time {
        use super::*;

        pub fn serialize<S: Serializer>(
            instant: &NaiveDateTime,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&format_date_time(instant))
        }
    }

    /// `null`, a missing key (with `#[serde(default)]`) and `""` all read as `None`.
    pub mod opt_date {
        use super::*;

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDate>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(text) if !text.is_empty() => {
                    parse_date(&text).map(Some).map_err(serde::de::Error::custom)
                }
                _ => Ok(None),
            }
        }
    }

    pub mod opt_date_time {
        use super::*;

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDateTime>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(text) if !text.is_empty() => parse_date_time(&text)
                    .map(Some)
                    .map_err(serde::de::Error::custom),
                _ => Ok(None),
            }
        }
    }
}
