//! The two-phase book validator.
//!
//! Phase one only runs for full replacement and checks that the caller echoed
//! a `version`. Phase two runs the field constraints shared by every write
//! path. Phase two is skipped when phase one fails, so a replacement without a
//! version reports that single problem.

use super::isbn::is_valid_isbn;
use super::{Violation, ViolationSet};
use crate::error::{BookError, BookResult};
use crate::resource::book::BookFields;
use crate::resource::mapper::MappedModel;
use crate::resource::model::BookModel;
use crate::resource::version::BookVersion;
use chrono::{NaiveDate, Utc};

const MAX_TEXT_LENGTH: usize = 255;
const MAX_PAGES: i64 = 9_999_999;

const NOT_BLANK: &str = "must not be blank";
const NOT_NULL: &str = "must not be null";
const TEXT_SIZE: &str = "size must be between 1 and 255";
const PAST_DATE: &str = "must be a past date";
const ISBN_PATTERN: &str = "must be a valid ISBN-10 or ISBN-13";
const POSITIVE: &str = "must be greater than 0";
const PAGE_DIGITS: &str = "numeric value out of bounds (<7 digits>.<0 digits> expected)";

/// Which rule set applies to a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationMode {
    /// Whole-resource create; field constraints only
    Create,
    /// Whole-resource replacement; version presence, then field constraints
    FullReplace,
    /// JSON Patch or Merge Patch result; field constraints only
    Patch,
}

impl ValidationMode {
    pub fn requires_version(self) -> bool {
        matches!(self, ValidationMode::FullReplace)
    }
}

/// A model that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBook {
    pub fields: BookFields,
    /// The version the caller based the write on, if it stated one
    pub version: Option<BookVersion>,
}

/// Validates reconstructed models against the book constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookValidator {
    today: NaiveDate,
}

impl Default for BookValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl BookValidator {
    /// A validator judging dates against the current UTC date.
    pub fn new() -> Self {
        Self::with_today(Utc::now().date_naive())
    }

    /// A validator with a fixed notion of "today".
    pub fn with_today(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Validate a bound model, returning every violation found on failure.
    pub fn validate(&self, mapped: MappedModel, mode: ValidationMode) -> BookResult<ValidatedBook> {
        let MappedModel {
            model,
            binding_violations,
        } = mapped;

        if mode.requires_version() && model.version.is_none() {
            let mut violations = ViolationSet::new();
            match binding_violations.iter().find(|v| v.field == "version") {
                Some(binding) => violations.push(binding.clone()),
                None => violations.push(Violation::new("version", NOT_NULL)),
            }
            return Err(BookError::ValidationFailed(violations));
        }

        let mut violations = binding_violations;
        let constraints = self.check_fields(&model, &violations);
        violations.extend(constraints);

        if !violations.is_empty() {
            return Err(BookError::ValidationFailed(violations));
        }

        into_validated(model).ok_or_else(|| {
            BookError::internal("validated model is missing a required field")
        })
    }

    // Fields that already failed to bind are not checked again; their value
    // is absent and would only produce a misleading "must not be null".
    fn check_fields(&self, model: &BookModel, binding: &ViolationSet) -> ViolationSet {
        let mut violations = ViolationSet::new();
        let mut check = |field: &str, result: Vec<&'static str>| {
            if !binding.concerns(field) {
                for message in result {
                    violations.push(Violation::new(field, message));
                }
            }
        };

        check("title", check_text(model.title.as_deref()));
        check("author", check_text(model.author.as_deref()));
        check(
            "publicationDate",
            check_publication_date(model.publication_date, self.today),
        );
        check("publisher", check_text(model.publisher.as_deref()));
        check("isbn", check_isbn(model.isbn.as_deref()));
        check("pages", check_pages(model.pages));

        violations
    }
}

fn check_text(value: Option<&str>) -> Vec<&'static str> {
    let Some(value) = value else {
        return vec![NOT_BLANK];
    };
    let mut failures = Vec::new();
    if value.trim().is_empty() {
        failures.push(NOT_BLANK);
    }
    let length = value.chars().count();
    if !(1..=MAX_TEXT_LENGTH).contains(&length) {
        failures.push(TEXT_SIZE);
    }
    failures
}

fn check_publication_date(value: Option<NaiveDate>, today: NaiveDate) -> Vec<&'static str> {
    match value {
        None => vec![NOT_NULL],
        Some(date) if date >= today => vec![PAST_DATE],
        Some(_) => Vec::new(),
    }
}

fn check_isbn(value: Option<&str>) -> Vec<&'static str> {
    match value {
        Some(isbn) if !is_valid_isbn(isbn) => vec![ISBN_PATTERN],
        _ => Vec::new(),
    }
}

fn check_pages(value: Option<i64>) -> Vec<&'static str> {
    let Some(pages) = value else {
        return Vec::new();
    };
    let mut failures = Vec::new();
    if pages <= 0 {
        failures.push(POSITIVE);
    }
    if pages.unsigned_abs() > MAX_PAGES.unsigned_abs() {
        failures.push(PAGE_DIGITS);
    }
    failures
}

fn into_validated(model: BookModel) -> Option<ValidatedBook> {
    Some(ValidatedBook {
        fields: BookFields {
            title: model.title?,
            author: model.author?,
            publication_date: model.publication_date?,
            publisher: model.publisher?,
            isbn: model.isbn,
            format: model.format,
            pages: model.pages.and_then(|p| u32::try_from(p).ok()),
        },
        version: model.version.map(BookVersion::new),
    })
}
