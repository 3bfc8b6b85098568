//! Dotted path resolution
//!
//! A dotted key such as `site.links.0.title` addresses both a bag and a value
//! inside it. The key is split into candidate `(bag name, in-bag path)` pairs,
//! longest bag name first:
//!
//! ```text
//! site.links.0.title  -> ("site.links.0.title", None)
//!                        ("site.links.0", "title")
//!                        ("site.links", "0.title")
//!                        ("site", "links.0.title")
//! ```
//!
//! The first candidate naming a known bag wins, even if walking its in-bag
//! path then finds nothing.

use serde_json::Value;

use crate::Bag;

/// Candidate splits of a dotted key, longest bag name first.
///
/// The first item is always the whole key with no in-bag path.
pub fn dotted_prefixes(key: &str) -> impl Iterator<Item = (&str, Option<&str>)> + '_ {
    let splits = key
        .char_indices()
        .rev()
        .filter(|&(_, ch)| ch == '.')
        .map(move |(idx, _)| (&key[..idx], Some(&key[idx + 1..])));
    std::iter::once((key, None)).chain(splits)
}

/// Walk a dot-separated path into a bag.
///
/// Mappings are indexed by key and sequences by a signed decimal index,
/// where `-1` is the last item. Returns `None` as soon as a segment is missing, a value can't be
/// indexed, an index is not a number or is out of range, or the walk lands
/// on `null`.
pub fn resolve<'a>(bag: &'a Bag, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut node = bag.get(first)?;
    for segment in segments {
        node = step(node, segment)?;
    }
    if node.is_null() {
        None
    } else {
        Some(node)
    }
}

fn step<'a>(node: &'a Value, segment: &str) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => items.get(array_index(segment, items.len())?),
        _ => None,
    }
}

/// Turn a signed decimal segment into a position, counting negatives from
/// the end of a sequence of `len` items.
fn array_index(segment: &str, len: usize) -> Option<usize> {
    let (negative, digits) = match segment.as_bytes().first()? {
        b'-' => (true, &segment[1..]),
        b'+' => (false, &segment[1..]),
        _ => (false, segment),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let index = digits.parse::<usize>().ok()?;
    if negative && index > 0 {
        len.checked_sub(index)
    } else {
        Some(index)
    }
}

/// The result of a dotted lookup: a whole bag or one value inside it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<'a> {
    Bag(&'a Bag),
    Value(&'a Value),
}

impl<'a> Resolved<'a> {
    /// The resolved value, if the lookup addressed a value inside a bag.
    pub fn as_value(&self) -> Option<&'a Value> {
        match *self {
            Resolved::Value(value) => Some(value),
            Resolved::Bag(_) => None,
        }
    }

    /// The resolved bag, if the lookup addressed a whole bag.
    pub fn as_bag(&self) -> Option<&'a Bag> {
        match *self {
            Resolved::Bag(bag) => Some(bag),
            Resolved::Value(_) => None,
        }
    }

    /// Clone the result into an owned value; a bag becomes an object.
    pub fn to_value(&self) -> Value {
        match *self {
            Resolved::Bag(bag) => Value::Object(bag.clone()),
            Resolved::Value(value) => value.clone(),
        }
    }
}
