//! Conversion between stored books and their canonical JSON tree.
//!
//! The mapping is driven by [`FIELD_PROJECTIONS`], a static table that names
//! every field of the representation, the order it is emitted in, and whether
//! callers may write it. Read-only fields are emitted on read and skipped when
//! a tree is bound back to a [`BookModel`]; the store reassigns them from the
//! current record, so a patch that "changes" `id` is accepted and has no
//! effect.

use super::book::{Book, BookFormat, DATE_FORMAT, TIMESTAMP_FORMAT};
use super::model::BookModel;
use crate::validation::{Violation, ViolationSet};
use chrono::NaiveDate;
use serde_json::{Map, Value, json};
use std::fmt;

type Reader = fn(&Book) -> Value;
type Binder = fn(&mut BookModel, &Value) -> Result<(), &'static str>;

/// Whether callers may set a field.
#[derive(Clone, Copy)]
pub enum FieldAccess {
    /// Emitted on read, ignored on write
    ReadOnly,
    /// Emitted on read and bound on write
    ReadWrite(Binder),
}

impl FieldAccess {
    pub fn is_read_only(&self) -> bool {
        matches!(self, FieldAccess::ReadOnly)
    }
}

impl fmt::Debug for FieldAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldAccess::ReadOnly => f.write_str("ReadOnly"),
            FieldAccess::ReadWrite(_) => f.write_str("ReadWrite"),
        }
    }
}

/// One entry of the projection table.
#[derive(Debug, Clone, Copy)]
pub struct FieldProjection {
    pub name: &'static str,
    pub access: FieldAccess,
    read: Reader,
}

impl FieldProjection {
    const fn read_only(name: &'static str, read: Reader) -> Self {
        Self {
            name,
            access: FieldAccess::ReadOnly,
            read,
        }
    }

    const fn read_write(name: &'static str, read: Reader, bind: Binder) -> Self {
        Self {
            name,
            access: FieldAccess::ReadWrite(bind),
            read,
        }
    }

    pub fn read(&self, book: &Book) -> Value {
        (self.read)(book)
    }
}

/// Every field of the book representation, in emission order.
pub static FIELD_PROJECTIONS: [FieldProjection; 11] = [
    FieldProjection::read_only("id", |b| json!(b.id.value())),
    FieldProjection::read_write("title", |b| json!(b.fields.title), |m, v| {
        m.title = bind_text(v)?;
        Ok(())
    }),
    FieldProjection::read_write("author", |b| json!(b.fields.author), |m, v| {
        m.author = bind_text(v)?;
        Ok(())
    }),
    FieldProjection::read_write(
        "publicationDate",
        |b| json!(b.fields.publication_date.format(DATE_FORMAT).to_string()),
        |m, v| {
            m.publication_date = bind_date(v)?;
            Ok(())
        },
    ),
    FieldProjection::read_write("publisher", |b| json!(b.fields.publisher), |m, v| {
        m.publisher = bind_text(v)?;
        Ok(())
    }),
    FieldProjection::read_write("isbn", |b| json!(b.fields.isbn), |m, v| {
        m.isbn = bind_text(v)?;
        Ok(())
    }),
    FieldProjection::read_write(
        "format",
        |b| json!(b.fields.format.map(BookFormat::label)),
        |m, v| {
            m.format = bind_format(v)?;
            Ok(())
        },
    ),
    FieldProjection::read_write("pages", |b| json!(b.fields.pages), |m, v| {
        m.pages = bind_integer(v)?;
        Ok(())
    }),
    FieldProjection::read_only("updatedDate", |b| {
        json!(b.updated_date.format(TIMESTAMP_FORMAT).to_string())
    }),
    FieldProjection::read_only("createdDate", |b| {
        json!(b.created_date.format(TIMESTAMP_FORMAT).to_string())
    }),
    FieldProjection::read_write("version", |b| json!(b.version.value()), |m, v| {
        m.version = bind_version(v)?;
        Ok(())
    }),
];

/// Look up a projection by its JSON name.
pub fn projection(name: &str) -> Option<&'static FieldProjection> {
    FIELD_PROJECTIONS.iter().find(|p| p.name == name)
}

/// A model bound from a tree, together with the fields that failed to bind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappedModel {
    pub model: BookModel,
    pub binding_violations: ViolationSet,
}

impl MappedModel {
    pub fn is_clean(&self) -> bool {
        self.binding_violations.is_empty()
    }
}

impl From<BookModel> for MappedModel {
    fn from(model: BookModel) -> Self {
        Self {
            model,
            binding_violations: ViolationSet::new(),
        }
    }
}

/// Project a stored book into its canonical tree.
pub fn book_to_tree(book: &Book) -> Value {
    let members: Map<String, Value> = FIELD_PROJECTIONS
        .iter()
        .map(|projection| (projection.name.to_string(), projection.read(book)))
        .collect();
    Value::Object(members)
}

/// Bind a tree back into a write model.
///
/// Unknown members and read-only fields are ignored. A member whose value has
/// the wrong shape is recorded as a binding violation and left unset.
pub fn model_from_tree(tree: &Value) -> MappedModel {
    let mut mapped = MappedModel::default();

    let Value::Object(members) = tree else {
        mapped
            .binding_violations
            .push(Violation::global("must be a JSON object"));
        return mapped;
    };

    for projection in &FIELD_PROJECTIONS {
        let FieldAccess::ReadWrite(bind) = projection.access else {
            continue;
        };
        if let Some(value) = members.get(projection.name) {
            if let Err(message) = bind(&mut mapped.model, value) {
                mapped
                    .binding_violations
                    .push(Violation::new(projection.name, message));
            }
        }
    }

    mapped
}

fn bind_text(value: &Value) -> Result<Option<String>, &'static str> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        _ => Err("must be a string"),
    }
}

fn bind_date(value: &Value) -> Result<Option<NaiveDate>, &'static str> {
    const MESSAGE: &str = "must be a date in dd/MM/yyyy format";
    match value {
        Value::Null => Ok(None),
        Value::String(s) => NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Some)
            .map_err(|_| MESSAGE),
        _ => Err(MESSAGE),
    }
}

fn bind_format(value: &Value) -> Result<Option<BookFormat>, &'static str> {
    const MESSAGE: &str = "must be one of Paperback, Hardback, Digital, Audio";
    match value {
        Value::Null => Ok(None),
        Value::String(s) => BookFormat::from_label(s).map(Some).ok_or(MESSAGE),
        _ => Err(MESSAGE),
    }
}

// Integral floats such as `250.0` bind; fractional ones do not.
fn bind_integer(value: &Value) -> Result<Option<i64>, &'static str> {
    const MESSAGE: &str = "must be an integer";
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(Some(i));
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(Some(f as i64)),
                _ => Err(MESSAGE),
            }
        }
        _ => Err(MESSAGE),
    }
}

// Versions use the full u64 range, beyond what `bind_integer` covers.
fn bind_version(value: &Value) -> Result<Option<u64>, &'static str> {
    match value {
        Value::Number(n) if n.as_u64().is_some() => Ok(n.as_u64()),
        other => match bind_integer(other)? {
            Some(n) => u64::try_from(n)
                .map(Some)
                .map_err(|_| "must be a non-negative integer"),
            None => Ok(None),
        },
    }
}
