//! Router configuration for the API.
//!
//! This module provides centralized route registration and middleware
//! configuration for the application.

use axum::{
    Json, Router,
    http::HeaderValue,
    middleware,
    routing::get,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{
    auth_middleware, global_error_handler, logging_middleware, request_id_middleware,
};
use crate::config::settings::ServerConfig;
use crate::state::AppState;

/// Path of the generated OpenAPI document.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs first):
/// 1. Request ID - generates/propagates request IDs
/// 2. Logging - access log inside a span carrying the request ID
/// 3. CORS and compression
/// 4. Global error handler - wraps non-JSON error responses in the envelope
///
/// # Routes
/// - `/api/expenses` - Expense CRUD, behind `auth_middleware`
/// - `/api/health`, `/api/health/ready`, `/api/health/live` - Health checks
/// - `/api-docs/openapi.json` - OpenAPI document
pub fn create_router(state: AppState, server: &ServerConfig) -> Router {
    let expense_routes = handlers::expenses::expense_routes().route_layer(
        middleware::from_fn_with_state(state.clone(), auth_middleware),
    );

    let (api_router, openapi) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api/expenses", expense_routes)
        .nest("/api", handlers::health::health_routes())
        .split_for_parts();

    api_router
        .route(
            OPENAPI_PATH,
            get(move || {
                let doc = openapi.clone();
                async move { Json(doc) }
            }),
        )
        .layer(middleware::from_fn(global_error_handler))
        .layer(CompressionLayer::new())
        .layer(cors_layer(&server.cors_origins))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Any origin when `origins` is empty; otherwise only the listed ones.
/// Unparseable origins are skipped with a warning.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(allowed)
}
