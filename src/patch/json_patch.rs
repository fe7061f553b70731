//! RFC 6902 JSON Patch application.
//!
//! Operations are applied in document order against a private working copy of
//! the target. The copy is returned only when every operation succeeds; a
//! failure anywhere discards it, so callers never observe a partially patched
//! document.

use super::pointer::{APPEND_TOKEN, JsonPointer, parse_array_index, resolve_tokens_mut};
use super::{PatchError, PatchResult};
use serde_json::{Map, Value};
use std::fmt;

/// A single JSON Patch operation.
///
/// Each variant carries exactly the members its `op` requires, so an `add`
/// without a value or a `move` without a source cannot be represented.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchOperation {
    Add { path: JsonPointer, value: Value },
    Remove { path: JsonPointer },
    Replace { path: JsonPointer, value: Value },
    Move { from: JsonPointer, path: JsonPointer },
    Copy { from: JsonPointer, path: JsonPointer },
    Test { path: JsonPointer, value: Value },
}

impl PatchOperation {
    /// The `op` member as it appears on the wire.
    pub fn op_name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Remove { .. } => "remove",
            Self::Replace { .. } => "replace",
            Self::Move { .. } => "move",
            Self::Copy { .. } => "copy",
            Self::Test { .. } => "test",
        }
    }

    /// The target location of the operation.
    pub fn path(&self) -> &JsonPointer {
        match self {
            Self::Add { path, .. }
            | Self::Remove { path }
            | Self::Replace { path, .. }
            | Self::Move { path, .. }
            | Self::Copy { path, .. }
            | Self::Test { path, .. } => path,
        }
    }

    /// Apply this operation to `document` in place.
    ///
    /// On error the document may be left half-modified; [`JsonPatch::apply`]
    /// only ever runs this against a disposable copy.
    pub fn apply_in_place(&self, document: &mut Value) -> PatchResult<()> {
        match self {
            Self::Add { path, value } => add(document, path, value.clone()),
            Self::Remove { path } => remove(document, path).map(drop),
            Self::Replace { path, value } => replace(document, path, value.clone()),
            Self::Move { from, path } => move_value(document, from, path),
            Self::Copy { from, path } => {
                let value = from
                    .resolve(document)
                    .cloned()
                    .ok_or_else(|| PatchError::target_missing(from))?;
                add(document, path, value)
            }
            Self::Test { path, value } => match path.resolve(document) {
                Some(current) if json_equal(current, value) => Ok(()),
                _ => Err(PatchError::TestFailed {
                    path: path.to_string(),
                }),
            },
        }
    }

    /// Render the operation back into its wire form.
    pub fn to_json(&self) -> Value {
        let mut members = Map::new();
        members.insert("op".to_string(), Value::String(self.op_name().to_string()));
        if let Self::Move { from, .. } | Self::Copy { from, .. } = self {
            members.insert("from".to_string(), Value::String(from.to_string()));
        }
        members.insert("path".to_string(), Value::String(self.path().to_string()));
        if let Self::Add { value, .. } | Self::Replace { value, .. } | Self::Test { value, .. } =
            self
        {
            members.insert("value".to_string(), value.clone());
        }
        Value::Object(members)
    }
}

impl fmt::Display for PatchOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move { from, path } | Self::Copy { from, path } => {
                write!(f, "{} {} -> {}", self.op_name(), from, path)
            }
            _ => write!(f, "{} {}", self.op_name(), self.path()),
        }
    }
}

/// An ordered JSON Patch document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JsonPatch {
    operations: Vec<PatchOperation>,
}

impl JsonPatch {
    pub fn new(operations: Vec<PatchOperation>) -> Self {
        Self { operations }
    }

    pub fn operations(&self) -> &[PatchOperation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Apply every operation in order and return the patched document.
    ///
    /// `target` is never modified.
    pub fn apply(&self, target: &Value) -> PatchResult<Value> {
        let mut working = target.clone();
        for operation in &self.operations {
            operation.apply_in_place(&mut working)?;
        }
        Ok(working)
    }

    pub fn to_json(&self) -> Value {
        Value::Array(self.operations.iter().map(PatchOperation::to_json).collect())
    }
}

impl From<Vec<PatchOperation>> for JsonPatch {
    fn from(operations: Vec<PatchOperation>) -> Self {
        Self::new(operations)
    }
}

fn add(document: &mut Value, path: &JsonPointer, value: Value) -> PatchResult<()> {
    let Some((parent_tokens, last)) = path.split_last() else {
        *document = value;
        return Ok(());
    };

    let parent =
        resolve_tokens_mut(document, parent_tokens).ok_or_else(|| PatchError::target_missing(path))?;

    match parent {
        Value::Object(members) => {
            members.insert(last.to_string(), value);
            Ok(())
        }
        Value::Array(items) => {
            if last == APPEND_TOKEN {
                items.push(value);
                return Ok(());
            }
            let index = parse_array_index(last).ok_or_else(|| PatchError::target_missing(path))?;
            if index > items.len() {
                return Err(PatchError::IndexOutOfRange {
                    path: path.to_string(),
                    length: items.len(),
                });
            }
            items.insert(index, value);
            Ok(())
        }
        _ => Err(PatchError::target_missing(path)),
    }
}

fn remove(document: &mut Value, path: &JsonPointer) -> PatchResult<Value> {
    let (parent_tokens, last) = path
        .split_last()
        .ok_or_else(|| PatchError::target_missing(path))?;

    let parent =
        resolve_tokens_mut(document, parent_tokens).ok_or_else(|| PatchError::target_missing(path))?;

    match parent {
        Value::Object(members) => members
            .shift_remove(last)
            .ok_or_else(|| PatchError::target_missing(path)),
        Value::Array(items) => match parse_array_index(last) {
            Some(index) if index < items.len() => Ok(items.remove(index)),
            _ => Err(PatchError::target_missing(path)),
        },
        _ => Err(PatchError::target_missing(path)),
    }
}

// Overwrites in place so an object member keeps its position.
fn replace(document: &mut Value, path: &JsonPointer, value: Value) -> PatchResult<()> {
    let slot = path
        .resolve_mut(document)
        .ok_or_else(|| PatchError::target_missing(path))?;
    *slot = value;
    Ok(())
}

fn move_value(document: &mut Value, from: &JsonPointer, path: &JsonPointer) -> PatchResult<()> {
    if from.resolve(document).is_none() {
        return Err(PatchError::target_missing(from));
    }
    if from == path {
        return Ok(());
    }
    if from.is_proper_prefix_of(path) {
        return Err(PatchError::InvalidMove {
            from: from.to_string(),
            path: path.to_string(),
        });
    }

    let value = remove(document, from)?;
    add(document, path, value)
}

/// Deep structural equality as required by the `test` operation.
///
/// Numbers compare by numeric value (`1` equals `1.0`) and object member
/// order is irrelevant.
pub fn json_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => {
            if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
                x == y
            } else if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
                x == y
            } else {
                match (a.as_f64(), b.as_f64()) {
                    (Some(x), Some(y)) => x == y,
                    _ => false,
                }
            }
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| json_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a
                    .iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| json_equal(x, y)))
        }
        _ => left == right,
    }
}
