//! Binding record validation
//!
//! Parsed JSON is filtered down to well-formed [`BindingRecord`]s. Nothing
//! here fails: malformed elements are dropped, never reported as errors.
//!
//! Normalization policy:
//! - `key` and `command` must be non-empty strings;
//! - a `when` that is not a string, or is the empty string, is treated as absent;
//! - `args` is copied as-is, including an explicit `null`;
//! - any other member is discarded.

use serde_json::Value;

use crate::models::BindingRecord;

/// Validate a single parsed value, returning a normalized record
pub fn validate(value: &Value) -> Option<BindingRecord> {
    let object = value.as_object()?;

    let key = non_empty_str(object.get("key"))?;
    let command = non_empty_str(object.get("command"))?;
    let when = non_empty_str(object.get("when")).map(str::to_string);
    let args = object.get("args").cloned();

    Some(BindingRecord {
        key: key.to_string(),
        command: command.to_string(),
        when,
        args,
    })
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Outcome of validating every element of a fragment's top-level array
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Validated {
    /// Valid records in document order
    pub records: Vec<BindingRecord>,
    /// Number of elements that were not well-formed bindings
    pub rejected: usize,
}

/// Validate each element of an array, keeping the valid ones in order
pub fn validate_all(items: &[Value]) -> Validated {
    let mut validated = Validated::default();
    for item in items {
        match validate(item) {
            Some(record) => validated.records.push(record),
            None => validated.rejected += 1,
        }
    }
    validated
}
