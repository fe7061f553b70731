//! Builder pattern for configuring book server instances.

use crate::book_server::BookServer;
use crate::error::{BuildError, BuildResult};
use crate::providers::BookProvider;
use crate::resource::BookId;

/// Configuration for a book server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookServerConfig {
    /// Base URL used to render the location of a book.
    /// Examples: "https://books.example.com", "http://localhost:8080"
    pub base_url: String,

    /// Page size used when a listing request does not state one.
    pub default_page_size: usize,

    /// Upper bound for requested page sizes.
    pub max_page_size: usize,
}

impl Default for BookServerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://localhost".to_string(),
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

impl BookServerConfig {
    /// The URL under which a book can be read back.
    pub fn location_for(&self, id: BookId) -> String {
        format!("{}/books/{}", self.base_url.trim_end_matches('/'), id)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> BuildResult<()> {
        if self.base_url.is_empty() {
            return Err(invalid("Base URL cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(invalid("Base URL must start with http:// or https://"));
        }

        if self.default_page_size == 0 {
            return Err(invalid("Default page size must be at least 1"));
        }

        if self.max_page_size < self.default_page_size {
            return Err(invalid(format!(
                "Maximum page size {} is smaller than the default page size {}",
                self.max_page_size, self.default_page_size
            )));
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> BuildError {
    BuildError::InvalidConfiguration {
        message: message.into(),
    }
}

/// Builder for configuring and creating book server instances.
///
/// # Examples
///
/// ```rust
/// use book_server::BookServerBuilder;
/// use book_server::providers::StandardBookProvider;
/// use book_server::storage::InMemoryStorage;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = StandardBookProvider::new(InMemoryStorage::new());
/// let server = BookServerBuilder::new(provider)
///     .with_base_url("https://books.example.com")
///     .with_default_page_size(10)
///     .build()?;
/// assert_eq!(server.config().default_page_size, 10);
/// # Ok(())
/// # }
/// ```
pub struct BookServerBuilder<P> {
    provider: P,
    config: BookServerConfig,
}

impl<P: BookProvider> BookServerBuilder<P> {
    /// Starts from the default configuration.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            config: BookServerConfig::default(),
        }
    }

    /// Set the base URL, without the `/books` path.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    pub fn with_default_page_size(mut self, size: usize) -> Self {
        self.config.default_page_size = size;
        self
    }

    pub fn with_max_page_size(mut self, size: usize) -> Self {
        self.config.max_page_size = size;
        self
    }

    /// Build the configured server.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidConfiguration`] if the configuration is
    /// rejected by [`BookServerConfig::validate`].
    pub fn build(self) -> BuildResult<BookServer<P>> {
        BookServer::with_config(self.provider, self.config)
    }
}
