//! Resolution of tool parameters that may arrive JSON-encoded as strings.
//!
//! Each helper accepts the native JSON shape or a string holding it and
//! reports problems as a [`ValidationError`] naming the parameter.
//! [`lenient_param`] runs strings through
//! [`parse_json_leniently`](super::parse_json_leniently); the array, record
//! and object helpers decode a string exactly once.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use super::lenient::{LenientOptions, parse_json_leniently};

const EXPECTED_ARRAY: &str = "expected an array or a JSON string containing an array";
const EXPECTED_OBJECT: &str = "expected an object or a JSON string containing an object";

/// A tool parameter failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid parameter '{param}': {message}")]
pub struct ValidationError {
    /// Name of the offending parameter.
    pub param: String,
    /// What was wrong with it.
    pub message: String,
}

impl ValidationError {
    pub fn new(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            param: param.into(),
            message: message.into(),
        }
    }
}

/// Length limits applied to a resolved array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArrayBounds {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl ArrayBounds {
    /// No limits.
    pub const UNBOUNDED: Self = Self {
        min: None,
        max: None,
    };

    /// At least `min` items.
    pub fn at_least(min: usize) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// Between `min` and `max` items, inclusive.
    pub fn between(min: usize, max: usize) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    fn check(&self, len: usize, param: &str) -> Result<(), ValidationError> {
        if let Some(min) = self.min.filter(|&min| len < min) {
            return Err(ValidationError::new(
                param,
                format!("expected at least {} item(s), got {}", min, len),
            ));
        }
        if let Some(max) = self.max.filter(|&max| len > max) {
            return Err(ValidationError::new(
                param,
                format!("expected at most {} item(s), got {}", max, len),
            ));
        }
        Ok(())
    }
}

/// Resolve a structured parameter, parsing strings leniently.
///
/// Non-string values are deserialized as-is.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use ankibridge_stats::coerce::lenient_param;
/// use serde_json::json;
///
/// let fields: HashMap<String, String> =
///     lenient_param(json!("{“Front”: “hi”}"), "fields")?;
/// assert_eq!(fields["Front"], "hi");
/// # Ok::<(), ankibridge_stats::coerce::ValidationError>(())
/// ```
pub fn lenient_param<T: DeserializeOwned>(value: Value, param: &str) -> Result<T, ValidationError> {
    lenient_param_with(value, param, &LenientOptions::default())
}

/// [`lenient_param`] with explicit parser options.
pub fn lenient_param_with<T: DeserializeOwned>(
    value: Value,
    param: &str,
    options: &LenientOptions,
) -> Result<T, ValidationError> {
    let resolved = match value {
        Value::String(text) => parse_json_leniently(&text, options).map_err(|failure| {
            ValidationError::new(
                param,
                format!(
                    "could not parse JSON string ({}). Pass a native JSON value instead of a string where possible",
                    failure
                ),
            )
        })?,
        other => other,
    };

    serde_json::from_value(resolved).map_err(|e| ValidationError::new(param, e.to_string()))
}

/// Resolve an array parameter and deserialize each item.
///
/// # Example
///
/// ```
/// use ankibridge_stats::coerce::{ArrayBounds, array_param};
/// use serde_json::json;
///
/// let ids: Vec<i64> = array_param(json!("[1, 2]"), "card_ids", ArrayBounds::at_least(1))?;
/// assert_eq!(ids, vec![1, 2]);
/// # Ok::<(), ankibridge_stats::coerce::ValidationError>(())
/// ```
pub fn array_param<T: DeserializeOwned>(
    value: Value,
    param: &str,
    bounds: ArrayBounds,
) -> Result<Vec<T>, ValidationError> {
    let items = match decode_string(value, param)? {
        Value::Array(items) => items,
        _ => return Err(ValidationError::new(param, EXPECTED_ARRAY)),
    };

    bounds.check(items.len(), param)?;

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item)
                .map_err(|e| ValidationError::new(param, format!("item {}: {}", index, e)))
        })
        .collect()
}

/// Resolve a string-to-string record parameter.
pub fn record_param(value: Value, param: &str) -> Result<HashMap<String, String>, ValidationError> {
    resolve_object(value, param)?
        .into_iter()
        .map(|(key, value)| match value {
            Value::String(text) => Ok((key, text)),
            other => Err(ValidationError::new(
                param,
                format!("value for key '{}' must be a string, got {}", key, other),
            )),
        })
        .collect()
}

/// Resolve an object parameter into a declared shape.
pub fn object_param<T: DeserializeOwned>(value: Value, param: &str) -> Result<T, ValidationError> {
    let object = resolve_object(value, param)?;
    serde_json::from_value(Value::Object(object))
        .map_err(|e| ValidationError::new(param, e.to_string()))
}

fn resolve_object(value: Value, param: &str) -> Result<Map<String, Value>, ValidationError> {
    match decode_string(value, param)? {
        Value::Object(object) => Ok(object),
        _ => Err(ValidationError::new(param, EXPECTED_OBJECT)),
    }
}

/// Decode a string value once; other values pass through.
fn decode_string(value: Value, param: &str) -> Result<Value, ValidationError> {
    match value {
        Value::String(text) => serde_json::from_str(&text)
            .map_err(|e| ValidationError::new(param, format!("invalid JSON string: {}", e))),
        other => Ok(other),
    }
}
