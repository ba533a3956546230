//! API handlers and router for the book catalog

pub mod books;
pub mod health;
pub mod openapi;

use axum::{routing::get, Router};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .nest("/books", books::router())
        .route("/books/", get(books::list_books).post(books::create_book))
        // OpenAPI document
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .with_state(state)
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
