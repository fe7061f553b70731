//! Structural ISBN-10 / ISBN-13 check.
//!
//! Accepts an optional `ISBN`, `ISBN-10` or `ISBN-13` label (optionally
//! followed by a colon, and always by a space) and then one of:
//!
//! - ten characters of digits with an `X` allowed as check character
//! - thirteen digits starting with 978 or 979
//! - a ten-digit number split into four groups by `-` or space
//! - a thirteen-digit number split into five groups by `-` or space
//!
//! The check digit itself is not verified.

use regex::Regex;
use std::sync::LazyLock;

/// Optional `ISBN` label in front of the number.
static LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ISBN(?:-1[03])?:? ").expect("invalid ISBN label pattern"));

/// Accepted overall shapes. The second pattern of a pair, when present, must
/// also match at the start of the number.
static SHAPES: LazyLock<Vec<(Regex, Option<Regex>)>> = LazyLock::new(|| {
    [
        (r"^[0-9X]{10}$", None),
        (r"^[- 0-9X]{13}$", Some(r"^(?:[0-9]+[- ]){3}")),
        (r"^97[89][0-9]{10}$", None),
        (r"^[- 0-9]{17}$", Some(r"^(?:[0-9]+[- ]){4}")),
    ]
    .into_iter()
    .map(|(shape, groups)| {
        (
            Regex::new(shape).expect("invalid ISBN shape pattern"),
            groups.map(|g| Regex::new(g).expect("invalid ISBN group pattern")),
        )
    })
    .collect()
});

/// Group layout shared by every accepted form, after the optional EAN prefix.
static GROUPS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:97[89][- ]?)?[0-9]{1,5}[- ]?[0-9]+[- ]?[0-9]+[- ]?[0-9X]$")
        .expect("invalid ISBN group layout pattern")
});

/// Check whether `value` is a syntactically valid ISBN.
pub fn is_valid_isbn(value: &str) -> bool {
    let body = strip_label(value);
    has_accepted_shape(body) && GROUPS.is_match(body)
}

// A label without the trailing space is not a label; the input is left as is
// so the shape checks reject it.
fn strip_label(value: &str) -> &str {
    match LABEL.find(value) {
        Some(label) => &value[label.end()..],
        None => value,
    }
}

fn has_accepted_shape(body: &str) -> bool {
    SHAPES.iter().any(|(shape, groups)| {
        shape.is_match(body) && groups.as_ref().is_none_or(|g| g.is_match(body))
    })
}
