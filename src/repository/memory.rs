//! In-memory book repository used by handler tests

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::Mutex;

use super::BookRepository;
use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookUpdate},
        query::{Criterion, FilterValue, ListQuery, QueryOperator},
    },
};

#[derive(Default)]
pub struct InMemoryBookRepository {
    books: Mutex<Vec<Book>>,
}

fn field_value(book: &Book, field: &str) -> Option<FilterValue> {
    match field {
        "author" => Some(FilterValue::Text(book.author.clone())),
        "title" => Some(FilterValue::Text(book.title.clone())),
        "publisher" => Some(FilterValue::Text(book.publisher.clone())),
        "publish_date" => Some(FilterValue::Text(book.publish_date.clone())),
        "status" => Some(FilterValue::Integer(i32::from(book.status).into())),
        "rating" => Some(FilterValue::Integer(book.rating.into())),
        _ => None,
    }
}

fn matches(book: &Book, criterion: &Criterion) -> bool {
    let Some(actual) = field_value(book, &criterion.field) else {
        return false;
    };
    match criterion.operator {
        QueryOperator::Equals => actual == criterion.value,
        QueryOperator::DoesNotEqual => actual != criterion.value,
        op => match (actual, &criterion.value) {
            (FilterValue::Integer(a), FilterValue::Integer(b)) => match op {
                QueryOperator::LessThan => a < *b,
                QueryOperator::GreaterThan => a > *b,
                QueryOperator::LessThanOrEqual => a <= *b,
                _ => a >= *b,
            },
            _ => false,
        },
    }
}

impl InMemoryBookRepository {
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Book>> {
        self.books.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn position(books: &[Book], id: &str) -> AppResult<usize> {
        books
            .iter()
            .position(|b| b.id.as_deref() == Some(id))
            .ok_or_else(|| AppError::not_found(id))
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn find_all(&self, query: &ListQuery) -> AppResult<Vec<Book>> {
        Ok(self
            .lock()
            .iter()
            .filter(|book| query.criteria.iter().all(|c| matches(book, c)))
            .skip(query.skip as usize)
            .take(query.limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn find_one(&self, id: &str) -> AppResult<Book> {
        let books = self.lock();
        let index = Self::position(&books, id)?;
        Ok(books[index].clone())
    }

    async fn update(&self, id: &str, fields: &BookUpdate) -> AppResult<()> {
        let mut books = self.lock();
        let index = Self::position(&books, id)?;
        let book = &mut books[index];
        if let Some(author) = &fields.author {
            book.author = author.clone();
        }
        if let Some(title) = &fields.title {
            book.title = title.clone();
        }
        if let Some(publisher) = &fields.publisher {
            book.publisher = publisher.clone();
        }
        if let Some(status) = fields.status {
            book.status = status;
        }
        if let Some(rating) = fields.rating {
            book.rating = rating;
        }
        if let Some(publish_date) = &fields.publish_date {
            book.publish_date = publish_date.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let mut books = self.lock();
        let index = Self::position(&books, id)?;
        books.remove(index);
        Ok(())
    }

    async fn is_existing_entry(&self, book: &Book) -> AppResult<bool> {
        Ok(self.lock().iter().any(|b| {
            b.author == book.author && b.title == book.title && b.publish_date == book.publish_date
        }))
    }

    async fn save(&self, book: &Book) -> AppResult<String> {
        let id = ObjectId::new().to_hex();
        self.lock().push(book.clone().with_id(id.clone()));
        Ok(id)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
