//! Merge of persisted state onto caller defaults
//!
//! Both sides are JSON images: `existing` is the serialized default, `loaded`
//! is the decoded file. Persisted values win on conflict, keys known only to
//! the default survive, sequences are replaced wholesale.
//!
//! Enum variants carrying data are externally tagged (`{"Busy": {...}}`) and
//! look like one-key mappings. Wherever both sides hold a one-key object and
//! the keys differ (a "variant site"), the caller decides per site whether it
//! is an enum switch to replace or a mapping to union.

use crate::shape::Shape;
use serde_json::Value;

/// Merge `loaded` onto `existing` in place, unioning every variant site.
pub fn merge(existing: &mut Value, loaded: Value) {
    merge_with(existing, loaded, &[])
}

/// Merge with per-site decisions: `switches[i]` replaces the i-th variant
/// site in visit order. Sites past the end of `switches` are unioned.
pub fn merge_with(existing: &mut Value, loaded: Value, switches: &[bool]) {
    let mut site = 0;
    merge_at(existing, loaded, switches, &mut site);
}

/// Number of variant sites `merge_with` will visit for this pair.
pub fn variant_sites(existing: &Value, loaded: &Value) -> usize {
    match (existing, loaded) {
        (Value::Object(target), Value::Object(source)) => {
            if is_variant_site(existing, loaded) {
                return 1;
            }
            source
                .iter()
                .filter_map(|(key, value)| target.get(key).map(|slot| variant_sites(slot, value)))
                .sum()
        }
        _ => 0,
    }
}

fn merge_at(existing: &mut Value, loaded: Value, switches: &[bool], site: &mut usize) {
    match (Shape::of(existing), Shape::of(&loaded)) {
        (_, Shape::Null) => {}
        (Shape::Mapping, Shape::Mapping) if is_variant_site(existing, &loaded) => {
            let replace = switches.get(*site).copied().unwrap_or(false);
            *site += 1;
            if replace {
                *existing = loaded;
            } else {
                union(existing, loaded, switches, site);
            }
        }
        (Shape::Mapping, Shape::Mapping) => union(existing, loaded, switches, site),
        // Sequences have no key to align elements on.
        (_, Shape::Sequence) | (_, Shape::Mapping) | (_, Shape::Scalar) => *existing = loaded,
    }
}

fn union(existing: &mut Value, loaded: Value, switches: &[bool], site: &mut usize) {
    if let (Value::Object(target), Value::Object(source)) = (existing, loaded) {
        for (key, value) in source {
            match target.get_mut(&key) {
                Some(slot) => merge_at(slot, value, switches, site),
                None => {
                    target.insert(key, value);
                }
            }
        }
    }
}

fn is_variant_site(existing: &Value, loaded: &Value) -> bool {
    match (existing, loaded) {
        (Value::Object(a), Value::Object(b)) if a.len() == 1 && b.len() == 1 => {
            a.keys().next() != b.keys().next()
        }
        _ => false,
    }
}

/// Top-level shape check run before merging.
///
/// Returns `Err((expected, found))` when the persisted content cannot be the
/// same kind of value as the default.
pub fn check_shape(existing: &Value, loaded: &Value) -> Result<(), (Shape, Shape)> {
    let expected = Shape::of(existing);
    let found = Shape::of(loaded);
    if expected.accepts(found) {
        Ok(())
    } else {
        Err((expected, found))
    }
}
