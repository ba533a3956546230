//! Error types for the book catalog server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Stable error kinds, independent of the message carried by an [`AppError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    AlreadyCheckedOut,
    AlreadyCheckedIn,
    UpdateError,
    ValidationError,
    ExistingRecord,
    MissingEnvVariable,
    StorageError,
    NotFoundError,
    PersistError,
    ConfigurationError,
}

impl ErrorKind {
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::AlreadyCheckedOut => "AlreadyCheckedOut",
            ErrorKind::AlreadyCheckedIn => "AlreadyCheckedIn",
            ErrorKind::UpdateError => "UpdateError",
            ErrorKind::ValidationError => "ValidationError",
            ErrorKind::ExistingRecord => "ExistingRecord",
            ErrorKind::MissingEnvVariable => "MissingEnvVariable",
            ErrorKind::StorageError => "StorageError",
            ErrorKind::NotFoundError => "NotFoundError",
            ErrorKind::PersistError => "PersistError",
            ErrorKind::ConfigurationError => "ConfigurationError",
        }
    }

    /// HTTP status a failure of this kind is reported with
    pub fn status_code(self) -> StatusCode {
        match self {
            ErrorKind::NotFoundError => StatusCode::NOT_FOUND,
            ErrorKind::ValidationError
            | ErrorKind::ExistingRecord
            | ErrorKind::AlreadyCheckedOut
            | ErrorKind::AlreadyCheckedIn => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Main application error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("{0}")]
    AlreadyCheckedOut(String),

    #[error("{0}")]
    AlreadyCheckedIn(String),

    #[error("{0}")]
    Update(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    ExistingRecord(String),

    #[error("{0}")]
    MissingEnvVariable(String),

    #[error("{0}")]
    Storage(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Persist(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AppError {
    pub fn already_checked_out(id: &str) -> Self {
        AppError::AlreadyCheckedOut(format!("Book {} is already checked out", id))
    }

    pub fn already_checked_in(id: &str) -> Self {
        AppError::AlreadyCheckedIn(format!("Book {} is already checked in", id))
    }

    pub fn not_found(id: &str) -> Self {
        AppError::NotFound(format!("Book {} does not exist", id))
    }

    pub fn existing_record() -> Self {
        AppError::ExistingRecord("Book already exists".to_string())
    }

    pub fn persist(detail: impl std::fmt::Display) -> Self {
        AppError::Persist(format!("Error saving book: {}", detail))
    }

    pub fn missing_env_variable(name: &str) -> Self {
        AppError::MissingEnvVariable(format!("need to set {} environment variable", name))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::AlreadyCheckedOut(_) => ErrorKind::AlreadyCheckedOut,
            AppError::AlreadyCheckedIn(_) => ErrorKind::AlreadyCheckedIn,
            AppError::Update(_) => ErrorKind::UpdateError,
            AppError::Validation(_) => ErrorKind::ValidationError,
            AppError::ExistingRecord(_) => ErrorKind::ExistingRecord,
            AppError::MissingEnvVariable(_) => ErrorKind::MissingEnvVariable,
            AppError::Storage(_) => ErrorKind::StorageError,
            AppError::NotFound(_) => ErrorKind::NotFoundError,
            AppError::Persist(_) => ErrorKind::PersistError,
            AppError::Configuration(_) => ErrorKind::ConfigurationError,
        }
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::Storage(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(e: config::ConfigError) -> Self {
        AppError::Configuration(e.to_string())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Error kind name
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let status = kind.status_code();

        if status.is_server_error() {
            tracing::error!("Internal error ({}): {}", kind, self);
        }

        let body = Json(ErrorResponse {
            error: kind.name().to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
