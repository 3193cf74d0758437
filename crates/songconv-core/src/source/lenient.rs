//! `deserialize_with` helpers that accept whatever shape the script files use.
//!
//! Table literals lower to JSON loosely: an empty table becomes `{}`, a mixed
//! table becomes an object keyed by index, numbers sometimes arrive as strings.
//! None of these helpers fail; an unusable value becomes the empty/`None` case.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;
use tracing::debug;

/// A list field. Accepts an array, or an object whose keys are indices (in
/// index order). Elements that do not fit `T` are dropped.
pub fn seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(seq_from_value(value))
}

pub(crate) fn seq_from_value<T: DeserializeOwned>(value: JsonValue) -> Vec<T> {
    let items = match value {
        JsonValue::Array(items) => items,
        JsonValue::Object(map) => {
            let mut indexed: Vec<(i64, JsonValue)> = map
                .into_iter()
                .filter_map(|(key, value)| key.parse::<i64>().ok().map(|index| (index, value)))
                .collect();
            indexed.sort_by_key(|(index, _)| *index);
            indexed.into_iter().map(|(_, value)| value).collect()
        }
        _ => Vec::new(),
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                debug!("Dropping list entry: {}", e);
                None
            }
        })
        .collect()
}

fn as_number(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

/// A number, or a string holding one.
pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(as_number(&value))
}

/// An integer; fractional values are truncated toward zero.
pub fn integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    if let JsonValue::Number(n) = &value
        && let Some(i) = n.as_i64()
    {
        return Ok(Some(i));
    }
    Ok(as_number(&value).map(|n| n.trunc() as i64))
}

/// Text; numbers are accepted and printed.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(match value {
        JsonValue::String(s) => Some(s),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Any scalar value, kept raw for later enum coercion. Tables become `None`.
pub fn raw<'de, D>(deserializer: D) -> Result<Option<JsonValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(match value {
        JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => None,
        scalar => Some(scalar),
    })
}
