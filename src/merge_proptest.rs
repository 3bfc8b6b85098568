//! Property-based tests for bag merging and dotted key splitting.
//!
//! These tests use proptest to generate random trees and keys and verify
//! that the merge and lookup invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::merge::{merge, merge_all};
    use crate::path::dotted_prefixes;
    use crate::Bag;
    use proptest::prelude::*;
    use serde_json::Value;

    fn key() -> impl Strategy<Value = String> {
        "[a-e]{1,2}"
    }

    fn leaf() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| Value::Number(n.into())),
            "[a-z]{0,6}".prop_map(Value::String),
        ]
    }

    fn value() -> impl Strategy<Value = Value> {
        leaf().prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::vec((key(), inner), 0..4)
                    .prop_map(|pairs| Value::Object(pairs.into_iter().collect())),
            ]
        })
    }

    fn bag() -> impl Strategy<Value = Bag> {
        prop::collection::vec((key(), value()), 0..5).prop_map(|pairs| pairs.into_iter().collect())
    }

    // ============================================================================
    // merge property tests
    // ============================================================================

    proptest! {
        /// Property: keys only in the base survive unchanged
        #[test]
        fn merge_preserves_base_only_keys(base in bag(), overlay in bag()) {
            let merged = merge(&base, &overlay);
            for (key, value) in &base {
                if !overlay.contains_key(key) {
                    prop_assert_eq!(merged.get(key), Some(value));
                }
            }
        }

        /// Property: shared mapping-valued keys are merged recursively
        #[test]
        fn merge_recurses_into_shared_mappings(base in bag(), overlay in bag()) {
            let merged = merge(&base, &overlay);
            for (key, incoming) in &overlay {
                if let (Some(Value::Object(b)), Value::Object(o)) = (base.get(key), incoming) {
                    prop_assert_eq!(merged.get(key), Some(&Value::Object(merge(b, o))));
                }
            }
        }

        /// Property: a non-mapping overlay value replaces the base value exactly
        #[test]
        fn merge_non_mapping_overlay_wins(base in bag(), overlay in bag()) {
            let merged = merge(&base, &overlay);
            for (key, incoming) in &overlay {
                if !incoming.is_object() {
                    prop_assert_eq!(merged.get(key), Some(incoming));
                }
            }
        }

        /// Property: base key order is kept and new keys follow in overlay order
        #[test]
        fn merge_key_order(base in bag(), overlay in bag()) {
            let merged = merge(&base, &overlay);
            let expected: Vec<&String> = base
                .keys()
                .chain(overlay.keys().filter(|k| !base.contains_key(*k)))
                .collect();
            let actual: Vec<&String> = merged.keys().collect();
            prop_assert_eq!(actual, expected);
        }

        /// Property: merging is deterministic
        #[test]
        fn merge_is_deterministic(base in bag(), overlay in bag()) {
            let first = serde_json::to_string(&merge(&base, &overlay)).unwrap();
            let second = serde_json::to_string(&merge(&base, &overlay)).unwrap();
            prop_assert_eq!(first, second);
        }

        /// Property: merge_all is a left-to-right fold of merge
        #[test]
        fn merge_all_folds_left(a in bag(), b in bag(), c in bag()) {
            let folded = merge(&merge(&merge(&Bag::new(), &a), &b), &c);
            prop_assert_eq!(merge_all([&a, &b, &c]), folded);
        }

        /// Property: the empty bag is an identity on both sides
        #[test]
        fn merge_empty_is_identity(data in bag()) {
            prop_assert_eq!(merge(&Bag::new(), &data), data.clone());
            prop_assert_eq!(merge(&data, &Bag::new()), data);
        }
    }

    // ============================================================================
    // dotted_prefixes property tests
    // ============================================================================

    proptest! {
        /// Property: every split rejoins to the original key
        #[test]
        fn dotted_prefixes_rejoin(key in "[a-z.]{0,12}") {
            for (name, rest) in dotted_prefixes(&key) {
                match rest {
                    None => prop_assert_eq!(name, key.as_str()),
                    Some(rest) => prop_assert_eq!(format!("{}.{}", name, rest), key.clone()),
                }
            }
        }

        /// Property: candidates get strictly shorter, starting with the whole key
        #[test]
        fn dotted_prefixes_longest_first(key in "[a-z.]{0,12}") {
            let names: Vec<&str> = dotted_prefixes(&key).map(|(name, _)| name).collect();
            prop_assert_eq!(names.len(), key.matches('.').count() + 1);
            prop_assert_eq!(names[0], key.as_str());
            for pair in names.windows(2) {
                prop_assert!(pair[0].len() > pair[1].len());
            }
        }
    }
}
