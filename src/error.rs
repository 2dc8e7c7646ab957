use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("request validation failed ({} field errors)", .0.len())]
    InvalidRequest(Vec<FieldError>),

    #[error("no such account: {0}")]
    UnknownAccount(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// True for errors caused by the caller's input rather than by the store.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_) | AppError::InvalidRequest(_) | AppError::UnknownAccount(_)
        )
    }

    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) | AppError::InvalidRequest(_) => "validation",
            AppError::UnknownAccount(_) => "unknown_account",
            AppError::Database(_) => "database",
            AppError::Migration(_) => "migration",
            AppError::Config(_) => "config",
            AppError::Internal(_) => "internal",
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
