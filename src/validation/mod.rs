//! Validation of reconstructed book models.
//!
//! Validation never stops at the first problem: every violation found is
//! collected into a [`ViolationSet`] and the whole set is reported at once.

pub mod isbn;
pub mod validator;

pub use validator::{BookValidator, ValidatedBook, ValidationMode};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name used as the subject of rendered violation messages.
pub const ENTITY_NAME: &str = "Book";

/// A single failed constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Violation {
    /// JSON name of the offending field; empty for whole-object problems
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// A violation that concerns the document as a whole.
    pub fn global(message: impl Into<String>) -> Self {
        Self::new("", message)
    }

    pub fn is_global(&self) -> bool {
        self.field.is_empty()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_global() {
            write!(f, "{} {}", ENTITY_NAME, self.message)
        } else {
            write!(f, "{} {} {}", ENTITY_NAME, self.field, self.message)
        }
    }
}

/// An ordered collection of violations without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViolationSet(Vec<Violation>);

impl ViolationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a violation unless an identical one is already present.
    pub fn push(&mut self, violation: Violation) {
        if !self.0.contains(&violation) {
            self.0.push(violation);
        }
    }

    pub fn extend(&mut self, other: ViolationSet) {
        for violation in other.0 {
            self.push(violation);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    /// True when at least one violation concerns `field`.
    pub fn concerns(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }

    /// Rendered messages in insertion order.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for ViolationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

impl FromIterator<Violation> for ViolationSet {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        let mut set = Self::new();
        for violation in iter {
            set.push(violation);
        }
        set
    }
}

impl IntoIterator for ViolationSet {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
