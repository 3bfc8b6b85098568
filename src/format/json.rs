//! JSON bag sources
//!
//! Objects are parsed with their key order intact at every nesting level
//! (`serde_json` is built with `preserve_order`). The document root must be
//! an object.

use serde_json::Value;

use crate::Bag;

/// Parse JSON text into a bag.
pub fn parse(text: &str) -> Result<Bag, String> {
    match serde_json::from_str::<Value>(text).map_err(|err| err.to_string())? {
        Value::Object(map) => Ok(map),
        other => Err(format!(
            "top-level value must be an object, found {}",
            type_name(&other)
        )),
    }
}

/// Human readable name of a JSON value's type, for error messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
