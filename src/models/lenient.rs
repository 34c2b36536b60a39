//! Tolerant field decoding for records written by older app versions.
//!
//! Numeric fields have been stored both as JSON numbers and as numeric
//! strings ("170"). Anything that does not parse reads as absent.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parse a loosely-typed numeric string the way the old screens did:
/// leading/trailing whitespace ignored, empty or garbage is `None`.
pub fn parse_number(raw: &str) -> Option<f64> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return None;
  }
  trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Leading integer of a string, ignoring whatever follows it ("10 reps" is 10,
/// "8.5" is 8). `None` when there are no leading digits.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
  let trimmed = raw.trim_start();
  let (sign, digits) = match trimmed.strip_prefix('-') {
    Some(rest) => (-1, rest),
    None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
  };
  let end = digits
    .char_indices()
    .find(|(_, c)| !c.is_ascii_digit())
    .map_or(digits.len(), |(i, _)| i);
  digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

fn value_as_f64(value: &Value) -> Option<f64> {
  match value {
    Value::Number(n) => n.as_f64(),
    Value::String(s) => parse_number(s),
    _ => None,
  }
}

pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<Value>::deserialize(deserializer)?;
  Ok(value.as_ref().and_then(value_as_f64))
}

/// Integer fields truncate toward zero, like `parseInt`
pub fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<Value>::deserialize(deserializer)?;
  Ok(value.as_ref().and_then(value_as_f64).map(|v| v.trunc() as i64))
}

/// String fields that were sometimes written as bare numbers
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<Value>::deserialize(deserializer)?;
  Ok(match value {
    Some(Value::String(s)) => s,
    Some(Value::Number(n)) => n.to_string(),
    _ => String::new(),
  })
}

/// Calendar date stored as `YYYY-MM-DD` or as a full ISO timestamp
pub fn opt_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<Value>::deserialize(deserializer)?;
  Ok(value.as_ref().and_then(Value::as_str).and_then(parse_date))
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
  let trimmed = raw.trim();
  NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
    .ok()
    .or_else(|| DateTime::parse_from_rfc3339(trimmed).ok().map(|dt| dt.date_naive()))
}
