//! The book resource model.
//!
//! # Key Components
//!
//! * [`Book`] - the stored entity, with store-owned id, version and timestamps
//! * [`BookModel`] - the unvalidated write model bound from request bodies
//! * [`mapper`] - the projection table between books and their JSON tree
//! * [`version`] - version tokens and compare-and-swap outcomes
//! * [`page`] - paging and sorting of listings

pub mod book;
pub mod context;
pub mod mapper;
pub mod model;
pub mod page;
pub mod version;

pub use book::{Book, BookFields, BookFormat, BookId, BookIdError, DATE_FORMAT, TIMESTAMP_FORMAT};
pub use context::RequestContext;
pub use mapper::{FIELD_PROJECTIONS, FieldAccess, MappedModel, book_to_tree, model_from_tree};
pub use model::BookModel;
pub use page::{Direction, Page, PageError, PageRequest, SortField, SortOrder};
pub use version::{BookVersion, ConditionalResult, VersionConflict};
