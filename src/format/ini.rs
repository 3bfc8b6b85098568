//! INI bag sources
//!
//! An INI bag is exactly two levels deep: every section becomes a top-level
//! key whose value maps option names to strings.
//!
//! ## Dialect
//!
//! - `key = value` and `key: value` lines, `#` and `;` comments
//! - option names are lower-cased, section names keep their case
//! - options before the first section header are rejected
//! - a section or an option repeated within one section is rejected
//! - `[DEFAULT]` is not a section of its own: its options are inherited by
//!   every other section, listed first and overridden in place by the
//!   section's own values
//! - an indented line continues the previous value, joined with a newline
//! - `%(name)s` expands to another option of the same section (or of
//!   `[DEFAULT]`), `%%` is a literal `%`, and any other `%` is an error
//! - no quoting or escaping

use std::collections::HashSet;

use ::ini::{Ini, ParseOption, Properties};
use serde_json::{Map, Value};

use crate::Bag;

/// Name of the section whose options every other section inherits.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Longest chain of `%(name)s` references followed before giving up.
pub const MAX_INTERPOLATION_DEPTH: usize = 10;

/// Parse INI text into a bag.
pub fn parse(text: &str) -> Result<Bag, String> {
    let options = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        enabled_indented_mutiline_value: true,
        ..ParseOption::default()
    };
    let document = Ini::load_from_str_opt(text, options).map_err(|err| err.to_string())?;

    let mut defaults = Map::new();
    let mut sections: Vec<(String, Map<String, Value>)> = Vec::new();
    let mut seen = HashSet::new();

    for (name, properties) in document.iter() {
        match name {
            None => {
                if let Some((key, _)) = properties.iter().next() {
                    return Err(format!(
                        "option '{}' appears before any section header",
                        key
                    ));
                }
            }
            Some(name) => {
                if !seen.insert(name) {
                    return Err(format!("section '{}' already exists", name));
                }
                let options = collect_options(name, properties)?;
                if name == DEFAULT_SECTION {
                    defaults = options;
                } else {
                    sections.push((name.to_string(), options));
                }
            }
        }
    }

    let mut bag = Bag::new();
    for (name, options) in sections {
        let mut merged = defaults.clone();
        merged.extend(options);
        let expanded = expand_section(&name, &merged)?;
        bag.insert(name, Value::Object(expanded));
    }
    Ok(bag)
}

/// Expand every option of a section, after `[DEFAULT]` has been merged in.
fn expand_section(
    section: &str,
    options: &Map<String, Value>,
) -> Result<Map<String, Value>, String> {
    options
        .iter()
        .map(|(option, raw)| {
            let raw = raw.as_str().unwrap_or_default();
            let value = interpolate(options, section, option, raw, 1)?;
            Ok((option.clone(), Value::String(value)))
        })
        .collect()
}

fn interpolate(
    options: &Map<String, Value>,
    section: &str,
    option: &str,
    raw: &str,
    depth: usize,
) -> Result<String, String> {
    if depth > MAX_INTERPOLATION_DEPTH {
        return Err(format!(
            "option '{}' in section '{}' nests interpolation deeper than {} levels",
            option, section, MAX_INTERPOLATION_DEPTH
        ));
    }

    let mut expanded = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(at) = rest.find('%') {
        expanded.push_str(&rest[..at]);
        rest = &rest[at..];

        if let Some(tail) = rest.strip_prefix("%%") {
            expanded.push('%');
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix("%(") {
            let reference = tail
                .find(')')
                .filter(|&close| close > 0 && tail[close..].starts_with(")s"));
            let Some(close) = reference else {
                return Err(format!(
                    "bad interpolation variable reference '{}' in option '{}' of section '{}'",
                    rest, option, section
                ));
            };
            let name = tail[..close].to_lowercase();
            let Some(value) = options.get(&name).and_then(Value::as_str) else {
                return Err(format!(
                    "option '{}' in section '{}' refers to unknown option '{}'",
                    option, section, name
                ));
            };
            if value.contains('%') {
                expanded.push_str(&interpolate(options, section, option, value, depth + 1)?);
            } else {
                expanded.push_str(value);
            }
            rest = &tail[close + 2..];
        } else {
            return Err(format!(
                "'%' must be followed by '%' or '(' in option '{}' of section '{}', found: '{}'",
                option, section, rest
            ));
        }
    }
    expanded.push_str(rest);
    Ok(expanded)
}

fn collect_options(section: &str, properties: &Properties) -> Result<Map<String, Value>, String> {
    let mut options = Map::new();
    for (key, value) in properties.iter() {
        let key = key.to_lowercase();
        if options.contains_key(&key) {
            return Err(format!(
                "option '{}' in section '{}' already exists",
                key, section
            ));
        }
        options.insert(key, Value::String(value.to_string()));
    }
    Ok(options)
}
