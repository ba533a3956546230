//! Book model, availability status and the partial field-set used for updates

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::error::AppResult;

static PUBLISH_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}$").expect("publish year pattern is valid"));

/// Availability status of a book (stored as an integer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
#[repr(i32)]
pub enum Status {
    #[default]
    Unknown = 0,
    CheckedIn = 1,
    CheckedOut = 2,
}

impl From<i32> for Status {
    fn from(v: i32) -> Self {
        match v {
            1 => Status::CheckedIn,
            2 => Status::CheckedOut,
            _ => Status::Unknown,
        }
    }
}

impl From<Status> for i32 {
    fn from(s: Status) -> Self {
        s as i32
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Status::Unknown => "Unknown",
            Status::CheckedIn => "CheckedIn",
            Status::CheckedOut => "CheckedOut",
        };
        write!(f, "{}", label)
    }
}

fn validate_status(status: &Status) -> Result<(), ValidationError> {
    match status {
        Status::CheckedIn | Status::CheckedOut => Ok(()),
        Status::Unknown => {
            let mut err = ValidationError::new("status");
            err.message = Some("status must be CheckedIn (1) or CheckedOut (2)".into());
            Err(err)
        }
    }
}

/// Book record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct Book {
    /// Identifier generated by the store on creation (24 hex characters)
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[validate(length(min = 1, max = 30, message = "author must be between 1 and 30 characters"))]
    pub author: String,
    #[validate(length(min = 1, max = 50, message = "title must be between 1 and 50 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 20, message = "publisher must be between 1 and 20 characters"))]
    pub publisher: String,
    /// 1 = checked in, 2 = checked out
    #[validate(custom(function = "validate_status"))]
    #[schema(value_type = i32, example = 1)]
    pub status: Status,
    #[validate(range(min = 0, max = 3, message = "rating must be one of 0, 1, 2, 3"))]
    pub rating: i32,
    /// Four digit publication year
    #[validate(regex(path = *PUBLISH_YEAR, message = "publish_date must be a four digit year"))]
    #[schema(example = "2019")]
    pub publish_date: String,
}

impl Book {
    /// Run every field rule, mapping failures to a validation error
    pub fn check(&self) -> AppResult<()> {
        self.validate()?;
        Ok(())
    }

    /// Same book carrying the given identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Partial field-set applied by an update.
///
/// Only the fields that are `Some` are written. There is no identifier
/// field: an update can never rewrite a book's id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookUpdate {
    pub author: Option<String>,
    pub title: Option<String>,
    pub publisher: Option<String>,
    pub status: Option<Status>,
    pub rating: Option<i32>,
    pub publish_date: Option<String>,
}

impl BookUpdate {
    /// Update touching only the availability status
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<&Book> for BookUpdate {
    fn from(book: &Book) -> Self {
        Self {
            author: Some(book.author.clone()),
            title: Some(book.title.clone()),
            publisher: Some(book.publisher.clone()),
            status: Some(book.status),
            rating: Some(book.rating),
            publish_date: Some(book.publish_date.clone()),
        }
    }
}
