//! Theme merge logic
//!
//! Merge semantics:
//! - Absent (null) override: base is kept
//! - Absent (null) base: override is taken
//! - Mappings: deep-merge by key
//! - Arrays: REPLACE (override wins entirely)
//! - Scalars, or a type mismatch: override wins

use serde_json::{Map, Value};

/// Returns true if the value can be merged key by key.
///
/// Null, arrays and scalars are atomic.
pub fn is_plain_mapping(value: &Value) -> bool {
    matches!(value, Value::Object(_))
}

/// Deep merge `overlay` onto `base`, leaving both inputs untouched.
pub fn merge(base: &Value, overlay: &Value) -> Value {
    merge_owned(base.clone(), overlay.clone())
}

/// Deep merge two owned trees, reusing their allocations.
pub fn merge_owned(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        // Absent override keeps the base
        (base, Value::Null) => base,

        // Absent base takes the override
        (Value::Null, overlay) => overlay,

        // Both mappings: deep merge
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            Value::Object(merge_maps(base_map, overlay_map))
        }

        // Arrays, scalars and mismatched kinds: overlay wins
        (_, overlay) => overlay,
    }
}

fn merge_maps(mut output: Map<String, Value>, overlay: Map<String, Value>) -> Map<String, Value> {
    for (key, overlay_value) in overlay {
        let merged = match overlay_value {
            Value::Object(overlay_map) => {
                // A non-mapping base value is discarded, the subtree is merged against `{}`
                let base_map = match output.remove(&key) {
                    Some(Value::Object(base_map)) => base_map,
                    _ => Map::new(),
                };
                Value::Object(merge_maps(base_map, overlay_map))
            }
            // Arrays and primitives (an explicit null included) replace the base value
            other => other,
        };
        output.insert(key, merged);
    }
    output
}

/// Merge configs in order, starting from an empty mapping.
///
/// Later entries take precedence: `merge_all([a, b, c]) == merge(merge(a, b), c)`.
pub fn merge_all<I>(configs: I) -> Value
where
    I: IntoIterator<Item = Value>,
{
    configs
        .into_iter()
        .fold(Value::Object(Map::new()), merge_owned)
}
