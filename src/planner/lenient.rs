//! Forgiving numeric fields for meal documents.
//!
//! Catalog rows and stored plans are not always clean: macros show up as
//! numbers, numeric strings, `null`, or not at all. Anything that can't be
//! read as a number becomes zero instead of failing the whole document.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(coerce_int).unwrap_or(0))
}

pub fn float<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(coerce_float).unwrap_or(0.0))
}

/// Text field where `null` reads as empty and scalars are stringified.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

/// Integer part of a JSON value, `0` when there is none.
pub fn coerce_int(value: &Value) -> i64 {
    coerce_float(value).trunc() as i64
}

pub fn coerce_float(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => leading_number(s).unwrap_or(0.0),
        Value::Bool(_) | Value::Null | Value::Array(_) | Value::Object(_) => 0.0,
    };
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

/// Parses the numeric prefix of `s`, so `"350 kcal"` reads as 350.
fn leading_number(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in s.char_indices() {
        match c {
            '0'..='9' => end = i + 1,
            '-' | '+' if i == 0 => {}
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
    }
    s[..end].parse::<f64>().ok()
}
