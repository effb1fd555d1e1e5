//! Property-based tests for the theme merge
//!
//! Uses proptest to check the merge policy over arbitrary configuration trees.

use proptest::prelude::*;
use serde_json::{Map, Value};
use vpack_theme::{merge, merge_all, ThemeProvider};

// =============================================================================
// Strategy generators for configuration trees
// =============================================================================

/// Generate a primitive or absent value
fn leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        (-1.0e6f64..1.0e6).prop_map(Value::from),
        "[a-z0-9#]{0,8}".prop_map(Value::String),
    ]
}

/// Generate an object from a value strategy; the small key alphabet makes
/// overlapping keys common
fn object_of(values: impl Strategy<Value = Value>) -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[a-d]{1,2}", values, 0..6)
        .prop_map(|map| Value::Object(map.into_iter().collect::<Map<String, Value>>()))
}

/// Generate an arbitrary tree: null, bool, number, string, array or object
fn value_strategy() -> impl Strategy<Value = Value> {
    leaf_strategy().prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            object_of(inner),
        ]
    })
}

/// Generate a tree whose root is a mapping
fn mapping_strategy() -> impl Strategy<Value = Value> {
    object_of(value_strategy())
}

// =============================================================================
// Identity and fold
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// An absent override leaves the base unchanged
    #[test]
    fn null_override_is_identity(tree in value_strategy()) {
        prop_assert_eq!(merge(&tree, &Value::Null), tree);
    }

    /// An absent base yields the override unchanged
    #[test]
    fn null_base_is_identity(tree in value_strategy()) {
        prop_assert_eq!(merge(&Value::Null, &tree), tree);
    }

    /// Merging a tree onto itself changes nothing
    #[test]
    fn merge_is_idempotent(tree in value_strategy()) {
        prop_assert_eq!(merge(&tree, &tree), tree);
    }

    /// The fold from `{}` agrees with nested merges
    #[test]
    fn merge_all_is_left_fold(
        a in mapping_strategy(),
        b in value_strategy(),
        c in value_strategy(),
    ) {
        let expected = merge(&merge(&a, &b), &c);
        prop_assert_eq!(merge_all(vec![a, b, c]), expected);
    }
}

// =============================================================================
// Precedence and non-mutation
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Inputs compare equal to their pre-merge clones
    #[test]
    fn inputs_are_not_mutated(base in value_strategy(), overlay in value_strategy()) {
        let base_before = base.clone();
        let overlay_before = overlay.clone();

        let mut merged = merge(&base, &overlay);
        if let Value::Object(map) = &mut merged {
            map.insert("touched".to_string(), Value::Bool(true));
            for value in map.values_mut() {
                *value = Value::Null;
            }
        }

        prop_assert_eq!(base, base_before);
        prop_assert_eq!(overlay, overlay_before);
    }

    /// Override leaves win and base-only keys survive
    #[test]
    fn override_wins_and_base_keys_survive(
        base in mapping_strategy(),
        overlay in mapping_strategy(),
    ) {
        let merged = merge(&base, &overlay);
        let (base_map, overlay_map) = (base.as_object().unwrap(), overlay.as_object().unwrap());
        let merged_map = merged.as_object().unwrap();

        for (key, value) in overlay_map {
            if !value.is_object() {
                prop_assert_eq!(&merged_map[key], value);
            }
        }
        for (key, value) in base_map {
            if !overlay_map.contains_key(key) {
                prop_assert_eq!(&merged_map[key], value);
            }
        }
        prop_assert!(merged_map.len() >= base_map.len().max(overlay_map.len()));
    }
}

// =============================================================================
// Provider agrees with the merge
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The provider hands out exactly `merge(defaults, theme)`
    #[test]
    fn provider_matches_merge(defaults in mapping_strategy(), theme in value_strategy()) {
        let provider = ThemeProvider::new(defaults.clone());
        let resolved = provider.resolve(Some(&theme)).unwrap();

        prop_assert_eq!(resolved.config(), &merge(&defaults, &theme));
        prop_assert_eq!(provider.defaults(), &defaults);
    }
}
