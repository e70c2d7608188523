//! Deep merge of partial theme objects
//!
//! Later sources win. Objects merge key by key, every other value (arrays
//! included) is replaced wholesale. Keys missing from every input stay
//! missing.

use crate::fragment::ThemeFragment;
use serde_json::{Map, Value};

/// Merge `overlay` into `base` in place
pub fn merge_into(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_into(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Merge two values, returning a new one
#[must_use]
pub fn merge(base: &Value, overlay: &Value) -> Value {
    let mut merged = base.clone();
    merge_into(&mut merged, overlay.clone());
    merged
}

/// Merge any number of values left to right, starting from `{}`
#[must_use]
pub fn merge_all<I>(values: I) -> Value
where
    I: IntoIterator<Item = Value>,
{
    values
        .into_iter()
        .fold(Value::Object(Map::new()), |mut acc, value| {
            merge_into(&mut acc, value);
            acc
        })
}

/// Merge fragments in the order given
///
/// Callers are responsible for ordering by precedence; see
/// [`FragmentKind::precedence`](crate::FragmentKind::precedence).
#[must_use]
pub fn merge_fragments<'a, I>(fragments: I) -> Value
where
    I: IntoIterator<Item = &'a ThemeFragment>,
{
    merge_all(fragments.into_iter().map(|f| f.tokens().clone()))
}
