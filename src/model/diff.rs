//! Structural diff over JSON objects

use crate::types::{JsonObject, JsonValue};

/// Fields of `current` that differ from `snapshot`.
///
/// Nested objects are diffed recursively and only their changed keys are
/// emitted. Arrays and scalars are compared whole. Keys removed since the
/// snapshot are not reported.
pub fn diff(current: &JsonObject, snapshot: &JsonObject) -> JsonObject {
    let mut changes = JsonObject::new();

    for (key, value) in current {
        match (value, snapshot.get(key)) {
            (_, Some(old)) if old == value => {}
            (JsonValue::Object(new), Some(JsonValue::Object(old))) => {
                let nested = diff(new, old);
                if !nested.is_empty() {
                    changes.insert(key.clone(), JsonValue::Object(nested));
                }
            }
            _ => {
                changes.insert(key.clone(), value.clone());
            }
        }
    }

    changes
}
