//! Recursive document merge — folds one YAML mapping into another.
//!
//! Mapping-valued keys present on both sides are unioned key-by-key,
//! recursively; any other collision is resolved by overwriting with the
//! incoming value, so later sources win at conflicting keys.

use serde_yaml::Value;

/// Merge `overlay` into `base`, mutating `base` in place.
///
/// For every key in `overlay`: if `base` holds a mapping at that key and the
/// incoming value is also a mapping, the two are merged recursively (the
/// nested mapping in `base` is never replaced wholesale). In every other case
/// the incoming value overwrites whatever `base` held — sequences and scalars
/// are replaced, not combined.
pub fn merge_into(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Mapping(base), Value::Mapping(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(key) {
                    Some(existing) => merge_into(existing, value),
                    None => {
                        base.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base, overlay) => *base = overlay.clone(),
    }
}
