//! OpenAPI documentation

use axum::Json;
use utoipa::OpenApi;

use crate::api::{books, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Book Catalog API",
        version = "1.0.0",
        description = "Library book catalog with checkout, check-in and ratings"
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        books::check_out_book,
        books::check_in_book,
        books::rate_book,
    ),
    components(
        schemas(
            crate::models::book::Book,
            crate::error::ErrorResponse,
            health::HealthResponse,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "books", description = "Book catalog")
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
