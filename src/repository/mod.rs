//! Storage gateway for book documents

pub mod books;
#[cfg(test)]
pub mod memory;

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookUpdate},
        query::ListQuery,
    },
};

pub use books::MongoBookRepository;

/// Operations the business layer needs from the document store.
///
/// Identifiers are opaque tokens; a token that cannot be parsed is
/// reported as `NotFound`, never as a parse error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Books matching the query's criteria, paginated
    async fn find_all(&self, query: &ListQuery) -> AppResult<Vec<Book>>;

    async fn find_one(&self, id: &str) -> AppResult<Book>;

    /// Apply a partial update; absent fields are left untouched
    async fn update(&self, id: &str, fields: &BookUpdate) -> AppResult<()>;

    async fn delete(&self, id: &str) -> AppResult<()>;

    /// Whether a book with the same author, title and publish date is stored
    async fn is_existing_entry(&self, book: &Book) -> AppResult<bool>;

    /// Insert a new book, returning its generated id
    async fn save(&self, book: &Book) -> AppResult<String>;

    /// Round-trip to the store, used by the readiness check
    async fn ping(&self) -> AppResult<()>;
}
