//! Optional text fields.
//!
//! The domain keeps `None` apart from any string value. The collapse of `""`
//! into `None` only happens here, at the input and exchange-format boundaries.
//! CSV cannot tell the two apart, so a present empty string written to CSV
//! reads back as absent.

use serde::{Deserialize, Deserializer};

/// Empty text means absent.
pub fn from_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// CSV field for an optional value. Absent and empty both become an empty field.
pub fn to_csv_field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

/// Bind value for an optional column: `NULL` for absent or empty text.
pub fn to_sql(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.is_empty())
}

/// JSON `null`, a missing key (with `#[serde(default)]`) and `""` all read as `None`.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.and_then(|text| from_empty(&text)))
}
