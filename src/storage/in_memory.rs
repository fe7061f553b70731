//! In-memory storage implementation for books.
//!
//! A thread-safe implementation of the `StorageProvider` trait backed by a
//! `BTreeMap` behind an async `RwLock`. Intended for tests, development and
//! deployments that do not need persistence.
//!
//! * Reads share the lock; writes take it exclusively
//! * The version check and the write of `compare_and_swap` happen under one
//!   write guard, so two writers holding the same version cannot both commit
//! * Listing is in id order because the map is keyed by id

use crate::resource::book::{Book, BookFields, BookId};
use crate::resource::version::{BookVersion, ConditionalResult, VersionConflict};
use crate::storage::{StorageError, StorageProvider};
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct StoreState {
    books: BTreeMap<BookId, Book>,
    last_id: u64,
}

/// Thread-safe in-memory storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageProvider for InMemoryStorage {
    type Error = StorageError;

    async fn insert(&self, fields: BookFields, at: NaiveDateTime) -> Result<Book, Self::Error> {
        let mut state = self.state.write().await;

        let id = state
            .last_id
            .checked_add(1)
            .and_then(BookId::new)
            .ok_or(StorageError::IdExhausted)?;
        state.last_id = id.value();

        let book = Book {
            id,
            fields,
            version: BookVersion::initial(),
            created_date: at,
            updated_date: at,
        };
        state.books.insert(id, book.clone());
        Ok(book)
    }

    async fn get(&self, id: BookId) -> Result<Option<Book>, Self::Error> {
        let state = self.state.read().await;
        Ok(state.books.get(&id).cloned())
    }

    async fn compare_and_swap(
        &self,
        id: BookId,
        expected: BookVersion,
        fields: BookFields,
        at: NaiveDateTime,
    ) -> Result<ConditionalResult<Book>, Self::Error> {
        let mut state = self.state.write().await;

        let Some(current) = state.books.get_mut(&id) else {
            return Ok(ConditionalResult::NotFound);
        };
        if current.version != expected {
            return Ok(ConditionalResult::VersionMismatch(VersionConflict::new(
                expected,
                current.version,
            )));
        }

        current.fields = fields;
        current.version = current.version.next();
        current.updated_date = at;
        Ok(ConditionalResult::Success(current.clone()))
    }

    async fn delete(&self, id: BookId) -> Result<bool, Self::Error> {
        let mut state = self.state.write().await;
        Ok(state.books.remove(&id).is_some())
    }

    async fn list(&self, offset: usize, limit: usize) -> Result<Vec<Book>, Self::Error> {
        let state = self.state.read().await;
        Ok(state
            .books
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Book>, Self::Error> {
        let state = self.state.read().await;
        Ok(state.books.values().cloned().collect())
    }

    async fn find_by_title(
        &self,
        title: &str,
        author: Option<&str>,
    ) -> Result<Option<Book>, Self::Error> {
        let state = self.state.read().await;
        Ok(state
            .books
            .values()
            .find(|book| book.title() == title && author.is_none_or(|a| book.author() == a))
            .cloned())
    }

    async fn count(&self) -> Result<usize, Self::Error> {
        let state = self.state.read().await;
        Ok(state.books.len())
    }

    async fn clear(&self) -> Result<(), Self::Error> {
        let mut state = self.state.write().await;
        state.books.clear();
        Ok(())
    }
}
