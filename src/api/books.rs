//! Book endpoints, mounted under `/books`

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};

use crate::{
    error::{AppError, AppResult},
    models::{book::Book, query::ListParams},
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route("/:id", get(get_book).put(update_book).delete(delete_book))
        .route("/checkout/:id", put(check_out_book))
        .route("/checkin/:id", put(check_in_book))
        .route("/:id/rate/:rate", put(rate_book))
}

/// Decode a request body, falling back to an empty book when it is malformed.
///
/// The empty book then fails validation, which is how a bad body is reported.
fn decode_book(body: &[u8]) -> Book {
    serde_json::from_slice(body).unwrap_or_else(|e| {
        tracing::debug!("Undecodable book payload: {}", e);
        Book::default()
    })
}

fn require_id(id: &str) -> AppResult<()> {
    if id.trim().is_empty() {
        return Err(AppError::Validation("Missing ID!".to_string()));
    }
    Ok(())
}

/// List books with filters and pagination
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(ListParams),
    responses(
        (status = 200, description = "List of books", body = Vec<Book>),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.find_all(&params.into_list_query()).await?;
    Ok(Json(books))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.find_one(&id).await?;
    Ok(Json(book))
}

/// Create a book, returning its generated ID
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = Book,
    responses(
        (status = 200, description = "ID of the created book", body = String),
        (status = 400, description = "Invalid or duplicate book", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(State(state): State<AppState>, body: Bytes) -> AppResult<String> {
    let id = state.services.books.create(decode_book(&body)).await?;
    Ok(id)
}

/// Replace the fields of a book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    request_body = Book,
    responses(
        (status = 200, description = "Book updated"),
        (status = 400, description = "Invalid book", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> AppResult<StatusCode> {
    state.services.books.update(&id, decode_book(&body)).await?;
    Ok(StatusCode::OK)
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    require_id(&id)?;
    state.services.books.delete(&id).await?;
    Ok(StatusCode::OK)
}

/// Check a book out
#[utoipa::path(
    put,
    path = "/books/checkout/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book checked out"),
        (status = 400, description = "Book already checked out", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn check_out_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    require_id(&id)?;
    state.services.books.check_out(&id).await?;
    Ok(StatusCode::OK)
}

/// Check a book back in
#[utoipa::path(
    put,
    path = "/books/checkin/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book checked in"),
        (status = 400, description = "Book already checked in", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn check_in_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    require_id(&id)?;
    state.services.books.check_in(&id).await?;
    Ok(StatusCode::OK)
}

/// Rate a book (0 to 3)
#[utoipa::path(
    put,
    path = "/books/{id}/rate/{rate}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID"),
        ("rate" = i32, Path, description = "New rating")
    ),
    responses(
        (status = 200, description = "Book rated"),
        (status = 400, description = "Rating is not a number or out of range", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn rate_book(
    State(state): State<AppState>,
    Path((id, rate)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    let rating: i32 = rate
        .trim()
        .parse()
        .map_err(|_| AppError::Validation("Rate must be a number!".to_string()))?;

    state.services.books.rate(&id, rating).await?;
    Ok(StatusCode::OK)
}
