//! Permissive argument coercion for model-produced tool arguments
//!
//! Errors are plain strings: they become `ToolResult::Failure` messages the
//! model reads, not Rust errors.

use serde_json::{Map, Value};

/// View the arguments as an object. `null` counts as no arguments.
pub fn as_object(arguments: &Value) -> Result<Map<String, Value>, String> {
    match arguments {
        Value::Null => Ok(Map::new()),
        Value::Object(map) => Ok(map.clone()),
        other => Err(format!("arguments must be an object, got {}", type_name(other))),
    }
}

/// Largest accepted paging value
pub const MAX_PAGING_VALUE: u64 = u32::MAX as u64;

/// Optional positive integer up to [`MAX_PAGING_VALUE`]; accepts integers and numeric strings
pub fn optional_positive_int(args: &Map<String, Value>, key: &str) -> Result<Option<u64>, String> {
    let value = match args.get(key) {
        None | Some(Value::Null) => return Ok(None),
        Some(value) => value,
    };
    let parsed = match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= MAX_PAGING_VALUE as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    match parsed {
        Some(0) => Err(format!("'{}' must be at least 1", key)),
        Some(n) if n > MAX_PAGING_VALUE => Err(format!("'{}' must be at most {}", key, MAX_PAGING_VALUE)),
        Some(n) => Ok(Some(n)),
        None => Err(format!("'{}' must be a positive integer, got {}", key, value)),
    }
}

/// Stringify a scalar; `None` for null, arrays and objects
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Required non-empty list of strings.
///
/// A lone scalar is treated as a one-element list; scalar elements are
/// stringified; null, nested arrays and objects are rejected.
pub fn required_string_list(args: &Map<String, Value>, key: &str) -> Result<Vec<String>, String> {
    let items: Vec<String> = match args.get(key) {
        None | Some(Value::Null) => return Err(format!("missing required argument '{}'", key)),
        Some(Value::Array(values)) => values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                scalar_to_string(v)
                    .ok_or_else(|| format!("'{}[{}]' must be a string, got {}", key, i, type_name(v)))
            })
            .collect::<Result<_, _>>()?,
        Some(value) => vec![scalar_to_string(value)
            .ok_or_else(|| format!("'{}' must be a list of strings, got {}", key, type_name(value)))?],
    };

    let items: Vec<String> = items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if items.is_empty() {
        return Err(format!("'{}' must be a non-empty list", key));
    }
    Ok(items)
}

/// Required non-empty string; numbers are stringified
pub fn required_string(args: &Map<String, Value>, key: &str) -> Result<String, String> {
    match args.get(key) {
        None | Some(Value::Null) => Err(format!("missing required argument '{}'", key)),
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Some(Value::String(_)) => Err(format!("'{}' must not be empty", key)),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(format!("'{}' must be a string, got {}", key, type_name(other))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
