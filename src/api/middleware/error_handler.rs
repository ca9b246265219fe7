//! Error handler for converting AppError to HTTP responses.
//!
//! Every failure leaves the API as the `{status: "fail", message}` envelope.
//! Only client-safe messages are rendered; error sources never are.

use axum::{
    Json,
    body::Body,
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

const GENERIC_INTERNAL_MESSAGE: &str = "An internal error occurred";
const SERVICE_UNAVAILABLE_MESSAGE: &str = "Service temporarily unavailable";
const VALIDATION_MESSAGE: &str = "Request validation failed";

/// Upper bound on a plain-text error body we are willing to re-wrap.
const MAX_REWRAP_BODY: usize = 4 * 1024;

impl IntoResponse for AppError {
    /// Converts an AppError into an HTTP response.
    ///
    /// # Status Code Mapping
    /// - NotFound → 404
    /// - Validation, BadRequest → 400
    /// - Unauthorized → 401
    /// - Internal, Database, Configuration → 500
    /// - ConnectionPool → 503
    ///
    /// Database, pool and configuration errors that reach this point were
    /// not classified by a service, so they are logged here.
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);

        let body = match self {
            AppError::NotFound { message }
            | AppError::BadRequest { message }
            | AppError::Unauthorized { message }
            | AppError::Internal { message, .. } => ErrorResponse::fail(message),
            AppError::Validation { errors } => {
                ErrorResponse::fail(VALIDATION_MESSAGE).with_errors(errors)
            }
            ref unclassified @ (AppError::Database { .. } | AppError::Configuration { .. }) => {
                tracing::error!(error = ?unclassified, "Unhandled error reached the API boundary");
                ErrorResponse::fail(GENERIC_INTERNAL_MESSAGE)
            }
            ref pool @ AppError::ConnectionPool { .. } => {
                tracing::error!(error = ?pool, "Database connection unavailable");
                ErrorResponse::fail(SERVICE_UNAVAILABLE_MESSAGE)
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Maps an AppError variant to its HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Validation { .. } | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        AppError::Internal { .. } | AppError::Database { .. } | AppError::Configuration { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Rewrites non-JSON 4xx/5xx responses produced outside our handlers
/// (unknown routes, wrong methods, framework rejections) into the fail
/// envelope.
///
/// For 4xx the original plain-text reason is kept as the message; 5xx bodies
/// are replaced by a generic message.
pub async fn global_error_handler(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) || is_json(&response) {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let original = axum::body::to_bytes(body, MAX_REWRAP_BODY)
        .await
        .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
        .unwrap_or_default();

    let message = if status.is_server_error() {
        GENERIC_INTERNAL_MESSAGE.to_string()
    } else if original.is_empty() {
        default_client_message(status).to_string()
    } else {
        original
    };

    let rewrapped = Json(ErrorResponse::fail(message)).into_response();
    let (new_parts, new_body) = rewrapped.into_parts();

    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.extend(new_parts.headers);
    Response::from_parts(parts, Body::new(new_body))
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"))
}

fn default_client_message(status: StatusCode) -> &'static str {
    match status {
        StatusCode::NOT_FOUND => "The requested resource was not found",
        StatusCode::METHOD_NOT_ALLOWED => "HTTP method not allowed for this endpoint",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "Unsupported media type",
        StatusCode::PAYLOAD_TOO_LARGE => "Request payload too large",
        _ => "Bad request",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldError;
    use axum::{Router, middleware, routing::get};
    use axum_test::TestServer;
    use serde_json::{Value, json};

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_renders_its_message() {
        let response = AppError::not_found("Expense tidak ditemukan").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({"status": "fail", "message": "Expense tidak ditemukan"})
        );
    }

    #[tokio::test]
    async fn test_internal_renders_message_not_source() {
        let response = AppError::internal(
            "Gagal menghapus expense",
            anyhow::anyhow!("password authentication failed for user \"expense\""),
        )
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body, json!({"status": "fail", "message": "Gagal menghapus expense"}));
    }

    #[tokio::test]
    async fn test_unclassified_database_error_is_generic() {
        let response = AppError::Database {
            operation: "insert expense".to_string(),
            source: anyhow::anyhow!("relation \"expenses\" does not exist"),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["message"], GENERIC_INTERNAL_MESSAGE);
        assert!(!body.to_string().contains("relation"));
    }

    #[tokio::test]
    async fn test_validation_lists_field_errors() {
        let response = AppError::Validation {
            errors: vec![FieldError {
                field: "category".to_string(),
                message: "category must be 1-100 characters".to_string(),
            }],
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["status"], "fail");
        assert_eq!(body["data"]["errors"][0]["field"], "category");
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::unauthorized("x"), StatusCode::UNAUTHORIZED),
            (
                AppError::BadRequest {
                    message: "x".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::ConnectionPool {
                    source: anyhow::anyhow!("timed out"),
                },
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::Configuration {
                    key: "jwt.secret".to_string(),
                    source: anyhow::anyhow!("missing"),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(error_to_status_code(&error), status);
        }
    }

    fn plain_text_router() -> Router {
        Router::new()
            .route("/ok", get(|| async { "fine" }))
            .route(
                "/teapot",
                get(|| async { (StatusCode::IM_A_TEAPOT, "short and stout") }),
            )
            .route(
                "/boom",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "stack trace here") }),
            )
            .layer(middleware::from_fn(global_error_handler))
    }

    #[tokio::test]
    async fn test_global_handler_wraps_plain_text_errors() {
        let server = TestServer::new(plain_text_router());

        let response = server.get("/teapot").await;
        response.assert_status(StatusCode::IM_A_TEAPOT);
        response.assert_json(&json!({"status": "fail", "message": "short and stout"}));

        let response = server.get("/boom").await;
        response.assert_status_internal_server_error();
        response.assert_json(&json!({"status": "fail", "message": GENERIC_INTERNAL_MESSAGE}));
    }

    #[tokio::test]
    async fn test_global_handler_leaves_success_alone() {
        let server = TestServer::new(plain_text_router());
        let response = server.get("/ok").await;
        response.assert_status_ok();
        response.assert_text("fine");
    }

    #[tokio::test]
    async fn test_global_handler_wraps_unknown_route() {
        let server = TestServer::new(plain_text_router());
        let response = server.get("/missing").await;
        response.assert_status_not_found();
        response.assert_json(&json!({
            "status": "fail",
            "message": "The requested resource was not found"
        }));
    }
}
