//! Fluent builders for book request bodies.

use serde_json::{Map, Value, json};

/// Builder for whole-book JSON bodies, starting from a valid book.
#[derive(Debug, Clone)]
pub struct BookBodyBuilder {
    data: Map<String, Value>,
}

impl BookBodyBuilder {
    /// A valid body with every required field.
    pub fn new() -> Self {
        let data = json!({
            "title": "Dune",
            "author": "Frank Herbert",
            "publicationDate": "01/08/1965",
            "publisher": "Chilton"
        });
        match data {
            Value::Object(data) => Self { data },
            _ => unreachable!(),
        }
    }

    /// A valid body with every optional field set too.
    pub fn full() -> Self {
        Self::new()
            .with("isbn", json!("978-0-306-40615-7"))
            .with("format", json!("Hardback"))
            .with("pages", json!(412))
    }

    pub fn with(mut self, field: &str, value: Value) -> Self {
        self.data.insert(field.to_string(), value);
        self
    }

    pub fn title(self, title: &str) -> Self {
        self.with("title", json!(title))
    }

    pub fn author(self, author: &str) -> Self {
        self.with("author", json!(author))
    }

    pub fn version(self, version: u64) -> Self {
        self.with("version", json!(version))
    }

    pub fn without(mut self, field: &str) -> Self {
        self.data.shift_remove(field);
        self
    }

    pub fn build(self) -> Value {
        Value::Object(self.data)
    }
}

impl Default for BookBodyBuilder {
    fn default() -> Self {
        Self::new()
    }
}
