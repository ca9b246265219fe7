use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::config::error::ConfigError;

/// A single field-level validation failure, safe to show to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Application-wide error type.
///
/// Every variant carries a message that may be rendered to the client.
/// Diagnostic detail (driver errors, connection strings, stack context)
/// lives in `source` and is only ever logged, never rendered.
#[derive(Error, Debug)]
pub enum AppError {
    /// A lookup, update or delete matched no record
    #[error("{message}")]
    NotFound { message: String },

    /// Request body failed boundary validation
    #[error("Validation failed: {} field error(s)", errors.len())]
    Validation { errors: Vec<FieldError> },

    /// Malformed request (bad JSON, wrong types, bad path params)
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Missing or invalid bearer token
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Store operation failed before it could be classified
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Connection could not be acquired from the pool
    #[error("Connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Catch-all for failures surfaced to the client with a generic message
    #[error("{message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound {
            message: message.into(),
        }
    }

    /// Wraps any error as `Internal`, keeping it as the diagnostic source.
    pub fn internal<E>(message: impl Into<String>, source: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        AppError::Internal {
            message: message.into(),
            source: source.into(),
        }
    }

    pub fn database(operation: impl Into<String>, source: diesel::result::Error) -> Self {
        AppError::Database {
            operation: operation.into(),
            source: anyhow::Error::new(source),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        AppError::Unauthorized {
            message: message.into(),
        }
    }

    /// True for errors that were classified as "not found" by the domain layer.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound { .. })
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal {
            message: "An internal error occurred".to_string(),
            source: error,
        }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        AppError::database("database operation", error)
    }
}

impl From<bb8::RunError<diesel_async::pooled_connection::PoolError>> for AppError {
    fn from(error: bb8::RunError<diesel_async::pooled_connection::PoolError>) -> Self {
        AppError::ConnectionPool {
            source: anyhow::Error::new(error),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let key = match &error {
            ConfigError::ValidationError { field, .. } => field.clone(),
            _ => "settings".to_string(),
        };
        AppError::Configuration {
            key,
            source: anyhow::Error::new(error),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut field_errors: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| FieldError {
                    field: field.to_string(),
                    message: err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value ({})", err.code)),
                })
            })
            .collect();
        // HashMap order is unstable; keep responses deterministic
        field_errors.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::Validation {
            errors: field_errors,
        }
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
