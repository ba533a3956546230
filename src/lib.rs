//! Book Catalog Server
//!
//! A REST JSON API managing a library's books: catalog CRUD, the
//! checkout/check-in cycle and ratings, backed by a MongoDB collection.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use crate::config::AppConfig;
pub use crate::error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
