//! Core book server structure and initialization.

use crate::book_server::builder::BookServerConfig;
use crate::error::{BookResult, BuildResult};
use crate::providers::BookProvider;
use crate::resource::{Book, PageRequest, SortOrder, book_to_tree};
use serde_json::Value;

/// Book server coordinating request decoding and a [`BookProvider`].
///
/// # Type Parameters
///
/// * `P` - The provider type that implements [`BookProvider`]
///
/// # Examples
///
/// ```rust
/// use book_server::{BookServer, providers::StandardBookProvider};
/// use book_server::storage::InMemoryStorage;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = StandardBookProvider::new(InMemoryStorage::new());
/// let server = BookServer::new(provider)?;
/// assert_eq!(server.config().max_page_size, 100);
/// # Ok(())
/// # }
/// ```
pub struct BookServer<P> {
    pub(super) provider: P,
    pub(super) config: BookServerConfig,
}

impl<P: BookProvider> BookServer<P> {
    /// Creates a server with the default configuration.
    pub fn new(provider: P) -> BuildResult<Self> {
        Self::with_config(provider, BookServerConfig::default())
    }

    /// Creates a server with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidConfiguration`](crate::error::BuildError::InvalidConfiguration)
    /// when `config` does not validate.
    pub fn with_config(provider: P, config: BookServerConfig) -> BuildResult<Self> {
        config.validate()?;
        Ok(Self { provider, config })
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &BookServerConfig {
        &self.config
    }

    /// Build a page request from optional query parameters.
    ///
    /// A missing or zero size falls back to the configured default and
    /// sizes above the configured maximum are capped.
    pub fn page_request(
        &self,
        page: Option<usize>,
        size: Option<usize>,
        sort: Option<&str>,
    ) -> BookResult<PageRequest> {
        let size = match size {
            None | Some(0) => self.config.default_page_size,
            Some(size) => size.min(self.config.max_page_size),
        };
        let request = PageRequest::new(page.unwrap_or(0), size);

        match sort.map(str::trim).filter(|s| !s.is_empty()) {
            Some(sort) => Ok(request.with_sort(sort.parse::<SortOrder>()?)),
            None => Ok(request),
        }
    }

    /// The wire representation of a book.
    pub fn render(&self, book: &Book) -> Value {
        book_to_tree(book)
    }
}
