//! Deep merging of bag trees
//!
//! Same-named bag sources are folded together left to right with [`merge`].
//! The later source wins on conflicting keys, but mappings present on both
//! sides are combined key by key instead of being replaced.

use serde_json::Value;

use crate::Bag;

/// Deep-merge `overlay` on top of `base`, returning a new tree.
///
/// For every key in `overlay`:
/// - if `base` also maps the key to a mapping and the overlay value is a
///   mapping, the two are merged recursively;
/// - otherwise the overlay value replaces the base value wholesale. Sequences
///   are never concatenated and scalars are never coerced.
///
/// Keys only in `base` are carried over unchanged. The result keeps `base`'s
/// key order; keys introduced by `overlay` are appended in overlay order.
/// Neither input is modified.
///
/// # Examples
///
/// ```
/// use databags::merge::merge;
/// use serde_json::json;
///
/// let base = json!({"red": "#ff0000", "nested": {"a": 1}});
/// let overlay = json!({"red": "#00ff00", "nested": {"b": 2}, "blue": "#0000ff"});
///
/// let merged = merge(base.as_object().unwrap(), overlay.as_object().unwrap());
/// assert_eq!(
///     serde_json::Value::Object(merged),
///     json!({"red": "#00ff00", "nested": {"a": 1, "b": 2}, "blue": "#0000ff"})
/// );
/// ```
pub fn merge(base: &Bag, overlay: &Bag) -> Bag {
    let mut result = base.clone();
    merge_into(&mut result, overlay);
    result
}

/// Merge `overlay` into `target` in place, with the same rules as [`merge`].
pub fn merge_into(target: &mut Bag, overlay: &Bag) {
    for (key, value) in overlay {
        match (target.get_mut(key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                merge_into(existing, incoming);
            }
            _ => {
                // Map::insert keeps the position of an existing key.
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Fold any number of trees together, left to right, from an empty bag.
pub fn merge_all<'a, I>(layers: I) -> Bag
where
    I: IntoIterator<Item = &'a Bag>,
{
    layers.into_iter().fold(Bag::new(), |mut acc, layer| {
        merge_into(&mut acc, layer);
        acc
    })
}
