//! MongoDB-backed book repository

use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId, Bson, Document},
    options::{ClientOptions, FindOptions},
    Client, Collection, Database,
};
use serde::{Deserialize, Serialize};
use tokio_stream::StreamExt;

use super::BookRepository;
use crate::{
    config::DatabaseConfig,
    error::{AppError, AppResult},
    models::{
        book::{Book, BookUpdate, Status},
        query::{Criterion, FilterValue, ListQuery, QueryOperator},
    },
};

/// Persisted shape of a book
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub author: String,
    pub title: String,
    pub publisher: String,
    pub status: Status,
    pub rating: i32,
    pub publish_date: String,
}

impl From<BookDocument> for Book {
    fn from(doc: BookDocument) -> Self {
        Book {
            id: doc.id.map(|oid| oid.to_hex()),
            author: doc.author,
            title: doc.title,
            publisher: doc.publisher,
            status: doc.status,
            rating: doc.rating,
            publish_date: doc.publish_date,
        }
    }
}

impl From<&Book> for BookDocument {
    /// The identifier is left out: the store generates it on insert.
    fn from(book: &Book) -> Self {
        BookDocument {
            id: None,
            author: book.author.clone(),
            title: book.title.clone(),
            publisher: book.publisher.clone(),
            status: book.status,
            rating: book.rating,
            publish_date: book.publish_date.clone(),
        }
    }
}

fn parse_id(id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| AppError::not_found(id))
}

fn comparison_operator(op: QueryOperator) -> &'static str {
    match op {
        QueryOperator::Equals => "$eq",
        QueryOperator::LessThan => "$lt",
        QueryOperator::GreaterThan => "$gt",
        QueryOperator::LessThanOrEqual => "$lte",
        QueryOperator::GreaterThanOrEqual => "$gte",
        QueryOperator::DoesNotEqual => "$ne",
    }
}

/// Translate filter criteria into a MongoDB query document
pub(crate) fn filter_document(criteria: &[Criterion]) -> Document {
    let mut filter = Document::new();
    for criterion in criteria {
        let value = match &criterion.value {
            FilterValue::Text(s) => Bson::String(s.clone()),
            FilterValue::Integer(i) => Bson::Int64(*i),
        };
        let condition = match criterion.operator {
            QueryOperator::Equals => value,
            op => {
                let mut cmp = Document::new();
                cmp.insert(comparison_operator(op), value);
                Bson::Document(cmp)
            }
        };
        filter.insert(criterion.field.clone(), condition);
    }
    filter
}

/// Fields of a `$set` update; `_id` is never part of it
pub(crate) fn set_document(fields: &BookUpdate) -> Document {
    let mut set = Document::new();
    if let Some(author) = &fields.author {
        set.insert("author", author.as_str());
    }
    if let Some(title) = &fields.title {
        set.insert("title", title.as_str());
    }
    if let Some(publisher) = &fields.publisher {
        set.insert("publisher", publisher.as_str());
    }
    if let Some(status) = fields.status {
        set.insert("status", i32::from(status));
    }
    if let Some(rating) = fields.rating {
        set.insert("rating", rating);
    }
    if let Some(publish_date) = &fields.publish_date {
        set.insert("publish_date", publish_date.as_str());
    }
    set
}

#[derive(Clone)]
pub struct MongoBookRepository {
    database: Database,
    collection: Collection<BookDocument>,
}

impl MongoBookRepository {
    pub fn new(database: Database, collection: &str) -> Self {
        Self {
            collection: database.collection(collection),
            database,
        }
    }

    /// Build a client for the configured store.
    ///
    /// Connections are established lazily; the configured timeout bounds
    /// both connection establishment and server selection.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let mut options = ClientOptions::parse(&config.url).await?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.connect_timeout = Some(config.connect_timeout());
        options.server_selection_timeout = Some(config.connect_timeout());

        let client = Client::with_options(options)?;
        Ok(Self::new(client.database(&config.name), &config.collection))
    }
}

#[async_trait]
impl BookRepository for MongoBookRepository {
    async fn find_all(&self, query: &ListQuery) -> AppResult<Vec<Book>> {
        let options = FindOptions::builder()
            .skip(query.skip)
            .limit(query.limit)
            .build();

        let mut cursor = self
            .collection
            .find(filter_document(&query.criteria), options)
            .await?;

        let mut books = Vec::new();
        while let Some(document) = cursor.next().await {
            books.push(Book::from(document?));
        }
        Ok(books)
    }

    async fn find_one(&self, id: &str) -> AppResult<Book> {
        let oid = parse_id(id)?;
        self.collection
            .find_one(doc! { "_id": oid }, None)
            .await?
            .map(Book::from)
            .ok_or_else(|| AppError::not_found(id))
    }

    async fn update(&self, id: &str, fields: &BookUpdate) -> AppResult<()> {
        let oid = parse_id(id)?;
        if fields.is_empty() {
            return Ok(());
        }

        let result = self
            .collection
            .update_one(doc! { "_id": oid }, doc! { "$set": set_document(fields) }, None)
            .await?;
        if result.matched_count == 0 {
            return Err(AppError::not_found(id));
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let oid = parse_id(id)?;
        let result = self.collection.delete_one(doc! { "_id": oid }, None).await?;
        if result.deleted_count == 0 {
            return Err(AppError::not_found(id));
        }
        Ok(())
    }

    async fn is_existing_entry(&self, book: &Book) -> AppResult<bool> {
        let filter = doc! {
            "author": book.author.as_str(),
            "title": book.title.as_str(),
            "publish_date": book.publish_date.as_str(),
        };
        Ok(self.collection.find_one(filter, None).await?.is_some())
    }

    async fn save(&self, book: &Book) -> AppResult<String> {
        let result = self
            .collection
            .insert_one(BookDocument::from(book), None)
            .await
            .map_err(AppError::persist)?;

        result
            .inserted_id
            .as_object_id()
            .map(|oid| oid.to_hex())
            .ok_or_else(|| AppError::persist("store returned a non ObjectId identifier"))
    }

    async fn ping(&self) -> AppResult<()> {
        self.database.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }
}
