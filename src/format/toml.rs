//! TOML bag sources
//!
//! The document is parsed with the `toml` crate and then converted into the
//! JSON value model every bag shares. Tables keep their key order
//! (`toml` is built with `preserve_order`).
//!
//! Values without a JSON counterpart are rendered as strings:
//! datetimes in their TOML textual form, non-finite floats as `nan`/`inf`.

use serde_json::{Map, Number, Value};
use toml::Value as TomlValue;

use crate::Bag;

/// Parse TOML text into a bag.
pub fn parse(text: &str) -> Result<Bag, String> {
    let table = text
        .parse::<toml::Table>()
        .map_err(|err| err.to_string().trim_end().to_string())?;
    Ok(convert_table(table))
}

fn convert_table(table: toml::Table) -> Map<String, Value> {
    table
        .into_iter()
        .map(|(key, value)| (key, convert_value(value)))
        .collect()
}

/// Convert one TOML value into the shared value model.
pub fn convert_value(value: TomlValue) -> Value {
    match value {
        TomlValue::String(s) => Value::String(s),
        TomlValue::Integer(i) => Value::Number(i.into()),
        TomlValue::Float(f) => Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(f.to_string())),
        TomlValue::Boolean(b) => Value::Bool(b),
        TomlValue::Datetime(dt) => Value::String(dt.to_string()),
        TomlValue::Array(items) => Value::Array(items.into_iter().map(convert_value).collect()),
        TomlValue::Table(table) => Value::Object(convert_table(table)),
    }
}
