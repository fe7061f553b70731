//! RFC 7396 JSON Merge Patch.
//!
//! A merge patch mirrors the shape of the target. Object members are merged
//! recursively, `null` deletes a member, and anything that is not an object
//! (arrays included) replaces the target value wholesale.

use serde_json::{Map, Value};

/// A merge patch document.
#[derive(Debug, Clone, PartialEq)]
pub struct MergePatch(Value);

impl MergePatch {
    pub fn new(patch: Value) -> Self {
        Self(patch)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Merge into a copy of `target`.
    ///
    /// Merging never fails; every JSON value is a valid merge patch.
    pub fn apply(&self, target: &Value) -> Value {
        let mut merged = target.clone();
        merge_in_place(&mut merged, &self.0);
        merged
    }
}

impl From<Value> for MergePatch {
    fn from(patch: Value) -> Self {
        Self::new(patch)
    }
}

/// Merge `patch` into `target` in place.
pub fn merge_in_place(target: &mut Value, patch: &Value) {
    let Value::Object(patch_members) = patch else {
        *target = patch.clone();
        return;
    };

    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    let Value::Object(target_members) = target else {
        return;
    };

    for (key, patch_value) in patch_members {
        if patch_value.is_null() {
            target_members.shift_remove(key);
        } else {
            let slot = target_members.entry(key.clone()).or_insert(Value::Null);
            merge_in_place(slot, patch_value);
        }
    }
}
