//! Book catalog service: validation, duplicate detection and the
//! checkout/check-in state machine on top of the storage gateway.

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookUpdate, Status},
        query::ListQuery,
    },
    repository::BookRepository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Arc<dyn BookRepository>,
}

impl BooksService {
    pub fn new(repository: Arc<dyn BookRepository>) -> Self {
        Self { repository }
    }

    pub async fn find_all(&self, query: &ListQuery) -> AppResult<Vec<Book>> {
        self.repository.find_all(query).await
    }

    pub async fn find_one(&self, id: &str) -> AppResult<Book> {
        self.repository.find_one(id).await
    }

    /// Create a new book and return its id.
    ///
    /// The duplicate check runs before validation, so a duplicate is
    /// reported as such even when the payload is also invalid.
    pub async fn create(&self, book: Book) -> AppResult<String> {
        if self.repository.is_existing_entry(&book).await? {
            return Err(AppError::existing_record());
        }

        book.check()?;

        let id = self.repository.save(&book).await.map_err(|e| match e {
            AppError::Persist(_) => e,
            other => AppError::persist(other),
        })?;

        tracing::info!("Created book id={} title={:?}", id, book.title);
        Ok(id)
    }

    /// Replace every field of an existing book except its id
    pub async fn update(&self, id: &str, book: Book) -> AppResult<()> {
        book.check()?;

        self.repository.find_one(id).await?;
        self.repository.update(id, &BookUpdate::from(&book)).await?;

        tracing::info!("Updated book id={}", id);
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.repository.find_one(id).await?;
        self.repository.delete(id).await?;

        tracing::info!("Deleted book id={}", id);
        Ok(())
    }

    pub async fn check_out(&self, id: &str) -> AppResult<()> {
        let book = self.repository.find_one(id).await?;
        if book.status == Status::CheckedOut {
            return Err(AppError::already_checked_out(id));
        }

        self.set_status(id, Status::CheckedOut).await?;
        tracing::info!("Checked out book id={}", id);
        Ok(())
    }

    pub async fn check_in(&self, id: &str) -> AppResult<()> {
        let book = self.repository.find_one(id).await?;
        if book.status == Status::CheckedIn {
            return Err(AppError::already_checked_in(id));
        }

        self.set_status(id, Status::CheckedIn).await?;
        tracing::info!("Checked in book id={}", id);
        Ok(())
    }

    /// Set the rating of an existing book.
    ///
    /// The whole record is validated again with the new rating, so an
    /// invalid stored field also blocks the update.
    pub async fn rate(&self, id: &str, rating: i32) -> AppResult<()> {
        let mut book = self.repository.find_one(id).await?;
        book.rating = rating;
        book.check()?;

        self.repository
            .update(id, &BookUpdate::from(&book))
            .await
            .map_err(update_failure)?;

        tracing::info!("Rated book id={} rating={}", id, rating);
        Ok(())
    }

    /// Check that the store answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }

    async fn set_status(&self, id: &str, status: Status) -> AppResult<()> {
        self.repository
            .update(id, &BookUpdate::status(status))
            .await
            .map_err(update_failure)
    }
}

/// A book removed between the lookup and the write stays NotFound
fn update_failure(err: AppError) -> AppError {
    match err {
        AppError::NotFound(_) => err,
        other => AppError::Update(other.to_string()),
    }
}
