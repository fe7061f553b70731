//! Parsing of request bodies into patch documents.
//!
//! The media type selects the format. Parsing is strict about the members each
//! operation requires and lenient about everything else: unknown members on an
//! operation object are ignored.

use super::json_patch::{JsonPatch, PatchOperation};
use super::merge::MergePatch;
use super::pointer::JsonPointer;
use super::{PatchError, PatchResult};
use serde_json::{Map, Value};

/// Media type for RFC 6902 documents.
pub const JSON_PATCH_MEDIA_TYPE: &str = "application/json-patch+json";

/// Media type for RFC 7396 documents.
pub const MERGE_PATCH_MEDIA_TYPE: &str = "application/merge-patch+json";

/// The format of a patch document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatchKind {
    JsonPatch,
    MergePatch,
}

impl PatchKind {
    pub fn media_type(self) -> &'static str {
        match self {
            Self::JsonPatch => JSON_PATCH_MEDIA_TYPE,
            Self::MergePatch => MERGE_PATCH_MEDIA_TYPE,
        }
    }

    /// Map a `Content-Type` header value to a patch format.
    ///
    /// Parameters such as `charset` are ignored and the comparison is
    /// case-insensitive.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = media_type_essence(content_type);
        if essence.eq_ignore_ascii_case(JSON_PATCH_MEDIA_TYPE) {
            Some(Self::JsonPatch)
        } else if essence.eq_ignore_ascii_case(MERGE_PATCH_MEDIA_TYPE) {
            Some(Self::MergePatch)
        } else {
            None
        }
    }
}

/// The `type/subtype` part of a media type, without parameters.
pub fn media_type_essence(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
}

/// A parsed patch of either format.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchDocument {
    Json(JsonPatch),
    Merge(MergePatch),
}

impl PatchDocument {
    /// Parse a raw request body as the given format.
    pub fn parse(kind: PatchKind, body: &[u8]) -> PatchResult<Self> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| PatchError::malformed(format!("body is not valid JSON: {e}")))?;
        Self::from_value(kind, value)
    }

    /// Interpret an already decoded JSON value as the given format.
    pub fn from_value(kind: PatchKind, value: Value) -> PatchResult<Self> {
        match kind {
            PatchKind::JsonPatch => parse_json_patch(value).map(Self::Json),
            PatchKind::MergePatch => Ok(Self::Merge(MergePatch::new(value))),
        }
    }

    pub fn kind(&self) -> PatchKind {
        match self {
            Self::Json(_) => PatchKind::JsonPatch,
            Self::Merge(_) => PatchKind::MergePatch,
        }
    }

    /// Apply to a copy of `target`.
    pub fn apply(&self, target: &Value) -> PatchResult<Value> {
        match self {
            Self::Json(patch) => patch.apply(target),
            Self::Merge(patch) => Ok(patch.apply(target)),
        }
    }
}

/// Validate the shape of an RFC 6902 document and build its operations.
pub fn parse_json_patch(value: Value) -> PatchResult<JsonPatch> {
    let Value::Array(entries) = value else {
        return Err(PatchError::malformed("a JSON Patch document must be an array"));
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Value::Object(members) => parse_operation(index, members),
            _ => Err(PatchError::malformed(format!(
                "operation {index} must be an object"
            ))),
        })
        .collect::<PatchResult<Vec<_>>>()
        .map(JsonPatch::new)
}

fn parse_operation(index: usize, mut members: Map<String, Value>) -> PatchResult<PatchOperation> {
    let op = string_member(index, &members, "op")?;
    let path = pointer_member(index, &members, "path")?;

    let operation = match op.as_str() {
        "add" => PatchOperation::Add {
            path,
            value: value_member(index, &mut members, &op)?,
        },
        "remove" => PatchOperation::Remove { path },
        "replace" => PatchOperation::Replace {
            path,
            value: value_member(index, &mut members, &op)?,
        },
        "move" => PatchOperation::Move {
            from: pointer_member(index, &members, "from")?,
            path,
        },
        "copy" => PatchOperation::Copy {
            from: pointer_member(index, &members, "from")?,
            path,
        },
        "test" => PatchOperation::Test {
            path,
            value: value_member(index, &mut members, &op)?,
        },
        other => {
            return Err(PatchError::malformed(format!(
                "operation {index} has unknown op '{other}'"
            )));
        }
    };

    Ok(operation)
}

fn string_member(index: usize, members: &Map<String, Value>, name: &str) -> PatchResult<String> {
    match members.get(name) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(PatchError::malformed(format!(
            "operation {index} member '{name}' must be a string"
        ))),
        None => Err(PatchError::malformed(format!(
            "operation {index} is missing '{name}'"
        ))),
    }
}

fn pointer_member(
    index: usize,
    members: &Map<String, Value>,
    name: &str,
) -> PatchResult<JsonPointer> {
    let raw = string_member(index, members, name)?;
    JsonPointer::parse(&raw)
        .map_err(|e| PatchError::malformed(format!("operation {index} member '{name}': {e}")))
}

// Presence matters, not content: an explicit `null` is a valid value.
fn value_member(index: usize, members: &mut Map<String, Value>, op: &str) -> PatchResult<Value> {
    members.shift_remove("value").ok_or_else(|| {
        PatchError::malformed(format!("operation {index} ('{op}') is missing 'value'"))
    })
}
