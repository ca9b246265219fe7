//! Response envelope shared by every expense endpoint.
//!
//! ```json
//! { "status": "success" | "fail", "message": "...", "data": { ... } }
//! ```
//! `message` and `data` are omitted when absent.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::FieldError;

/// Outcome marker of the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Fail,
}

/// Successful response carrying a payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Successful response with only a message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"status": "success", "message": "Expense berhasil dihapus"}))]
pub struct MessageResponse {
    pub status: ResponseStatus,
    pub message: String,
}

impl MessageResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: message.into(),
        }
    }
}

/// Field-level details attached to validation failures.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetails {
    pub errors: Vec<FieldError>,
}

/// Failure envelope. `status` is always `"fail"`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"status": "fail", "message": "Expense tidak ditemukan"}))]
pub struct ErrorResponse {
    pub status: ResponseStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ErrorDetails>,
}

impl ErrorResponse {
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Fail,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.data = Some(ErrorDetails { errors });
        self
    }
}
