//! Field validation and sanitisation.
//!
//! Every text field is trimmed and HTML-escaped before it is stored, emails
//! are normalised to lowercase, and failures are reported per field so the
//! frontend can show them next to the matching input.

use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use serde_json::Value;
use validator::ValidateEmail;

/// A single failed field, shaped like the error objects the website
/// already consumes: `{"msg": .., "param": .., "location": "body"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub msg: &'static str,
    pub param: &'static str,
    pub location: &'static str,
}

impl FieldError {
    pub fn new(param: &'static str, msg: &'static str) -> FieldError {
        FieldError {
            msg,
            param,
            location: "body",
        }
    }
}

/// Escapes characters that must not reach stored HTML contexts.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Required text field: must be present and non-empty after trimming.
pub fn required_text(
    param: &'static str,
    value: Option<&str>,
    msg: &'static str,
) -> Result<String, FieldError> {
    let trimmed = value.unwrap_or_default().trim();
    if trimmed.is_empty() {
        return Err(FieldError::new(param, msg));
    }
    Ok(escape(trimmed))
}

/// Optional text field: a missing or blank value collapses to `None`.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    let trimmed = value.unwrap_or_default().trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(escape(trimmed))
    }
}

/// Required email: format-checked, then normalised to lowercase.
pub fn email(
    param: &'static str,
    value: Option<&str>,
    msg: &'static str,
) -> Result<String, FieldError> {
    let normalized = value.unwrap_or_default().trim().to_lowercase();
    if !normalized.validate_email() {
        return Err(FieldError::new(param, msg));
    }
    Ok(normalized)
}

/// Calendar date, accepted as `YYYY-MM-DD` or a full RFC 3339 timestamp.
/// Either way only the date part is kept.
pub fn date(
    param: &'static str,
    value: Option<&str>,
    msg: &'static str,
) -> Result<NaiveDate, FieldError> {
    let raw = value.unwrap_or_default().trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| FieldError::new(param, msg))
}

/// Boolean flag coerced the way the frontend delivers it: a real boolean,
/// the strings "true"/"false"/"1"/"0", or the numbers 0/1.
pub fn boolean(
    param: &'static str,
    value: Option<&Value>,
    msg: &'static str,
) -> Result<bool, FieldError> {
    match value {
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(Value::String(raw)) => match raw.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(FieldError::new(param, msg)),
        },
        Some(Value::Number(n)) => match n.as_i64() {
            Some(1) => Ok(true),
            Some(0) => Ok(false),
            _ => Err(FieldError::new(param, msg)),
        },
        _ => Err(FieldError::new(param, msg)),
    }
}
