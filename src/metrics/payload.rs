//! Defensive accessors for raw scanner payloads.
//!
//! Scanner output is never trusted to match a schema. Every lookup returns an
//! `Option` or an empty slice instead of failing on a missing key or a value
//! of the wrong type.

use serde_json::Value;

/// Walk `path` through nested objects, returning `None` at the first missing link.
pub fn get_path<'a>(doc: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(doc, |node, key| node.get(*key))
}

/// Array at `path`, or an empty slice when absent or not an array.
pub fn array_at<'a>(doc: &'a Value, path: &[&str]) -> &'a [Value] {
    get_path(doc, path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// First candidate key holding a non-empty array.
///
/// An empty list or a non-array value moves on to the next candidate.
pub fn first_array<'a>(doc: &'a Value, keys: &[&str]) -> &'a [Value] {
    keys.iter()
        .map(|key| array_at(doc, &[*key]))
        .find(|items| !items.is_empty())
        .unwrap_or(&[])
}

/// String at `key` on an item, if present and a string.
pub fn str_field<'a>(item: &'a Value, key: &str) -> Option<&'a str> {
    item.get(key).and_then(Value::as_str)
}

/// Numeric value, accepting JSON numbers and numeric strings.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// First candidate key holding a finite, strictly positive number; 0.0 otherwise.
pub fn first_positive_number(doc: &Value, keys: &[&str]) -> f64 {
    keys.iter()
        .filter_map(|key| doc.get(*key).and_then(as_number))
        .find(|n| n.is_finite() && *n > 0.0)
        .unwrap_or(0.0)
}
