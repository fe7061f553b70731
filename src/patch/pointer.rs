//! RFC 6901 JSON Pointer parsing and resolution.
//!
//! A pointer is a sequence of reference tokens separated by `/`. Inside a token
//! `~1` decodes to `/` and `~0` decodes to `~`. The empty string points at the
//! whole document.

use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Token that designates the position after the last array element.
pub const APPEND_TOKEN: &str = "-";

/// Errors produced while parsing a pointer string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PointerError {
    /// Non-empty pointers must start with `/`
    #[error("pointer '{0}' must be empty or start with '/'")]
    MissingLeadingSlash(String),

    /// `~` must be followed by `0` or `1`
    #[error("pointer '{0}' contains an invalid '~' escape")]
    InvalidEscape(String),
}

/// A parsed JSON Pointer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPointer {
    tokens: Vec<String>,
}

impl JsonPointer {
    /// The pointer to the whole document.
    pub fn root() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Parse a pointer from its string form.
    pub fn parse(pointer: &str) -> Result<Self, PointerError> {
        if pointer.is_empty() {
            return Ok(Self::root());
        }

        let rest = pointer
            .strip_prefix('/')
            .ok_or_else(|| PointerError::MissingLeadingSlash(pointer.to_string()))?;

        let tokens = rest
            .split('/')
            .map(|raw| {
                unescape_token(raw).ok_or_else(|| PointerError::InvalidEscape(pointer.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { tokens })
    }

    /// Build a pointer from already decoded tokens.
    pub fn from_tokens<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Split into the parent tokens and the final token.
    ///
    /// Returns `None` for the root pointer, which has no parent.
    pub fn split_last(&self) -> Option<(&[String], &str)> {
        self.tokens
            .split_last()
            .map(|(last, parent)| (parent, last.as_str()))
    }

    /// True when `other` points strictly inside the value this pointer designates.
    pub fn is_proper_prefix_of(&self, other: &JsonPointer) -> bool {
        other.tokens.len() > self.tokens.len() && other.tokens.starts_with(&self.tokens)
    }

    /// Resolve against a document.
    pub fn resolve<'a>(&self, document: &'a Value) -> Option<&'a Value> {
        resolve_tokens(document, &self.tokens)
    }

    /// Resolve against a document for mutation.
    pub fn resolve_mut<'a>(&self, document: &'a mut Value) -> Option<&'a mut Value> {
        resolve_tokens_mut(document, &self.tokens)
    }
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "/{}", token.replace('~', "~0").replace('/', "~1"))?;
        }
        Ok(())
    }
}

impl FromStr for JsonPointer {
    type Err = PointerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parse an array index token.
///
/// Only plain decimal numbers are accepted; leading zeros are rejected except
/// for `0` itself.
pub fn parse_array_index(token: &str) -> Option<usize> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if token.len() > 1 && token.starts_with('0') {
        return None;
    }
    token.parse().ok()
}

pub(crate) fn resolve_tokens<'a>(document: &'a Value, tokens: &[String]) -> Option<&'a Value> {
    tokens.iter().try_fold(document, |current, token| match current {
        Value::Object(members) => members.get(token),
        Value::Array(items) => parse_array_index(token).and_then(|index| items.get(index)),
        _ => None,
    })
}

pub(crate) fn resolve_tokens_mut<'a>(
    document: &'a mut Value,
    tokens: &[String],
) -> Option<&'a mut Value> {
    tokens
        .iter()
        .try_fold(document, |current, token| match current {
            Value::Object(members) => members.get_mut(token),
            Value::Array(items) => {
                parse_array_index(token).and_then(move |index| items.get_mut(index))
            }
            _ => None,
        })
}

fn unescape_token(raw: &str) -> Option<String> {
    let mut decoded = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '~' {
            match chars.next() {
                Some('0') => decoded.push('~'),
                Some('1') => decoded.push('/'),
                _ => return None,
            }
        } else {
            decoded.push(c);
        }
    }
    Some(decoded)
}
