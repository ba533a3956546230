//! Data models for the book catalog

pub mod book;
pub mod query;

// Re-export commonly used types
pub use book::{Book, BookUpdate, Status};
pub use query::{Criterion, FilterValue, ListParams, ListQuery, QueryOperator};
