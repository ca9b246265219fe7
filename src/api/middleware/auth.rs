//! JWT authentication middleware.
//!
//! Verifies bearer tokens issued by the account service and exposes the
//! caller as `AuthUser`.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::utils::jwt::{Claims, validate_access_token};

/// Authenticated caller, inserted into request extensions by
/// `auth_middleware` and extracted in handlers with `Extension<AuthUser>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// User id from the `sub` claim
    pub user_id: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self { user_id: claims.sub }
    }
}

/// JWT authentication middleware
///
/// # Headers
/// Expects: `Authorization: Bearer <token>`
///
/// # Errors
/// Returns 401 Unauthorized if the header is missing or malformed, or the
/// token fails verification or has expired.
///
/// # Example
/// ```ignore
/// OpenApiRouter::new()
///     .routes(routes!(handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
/// ```
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())?;
    let claims = validate_access_token(token, &state.jwt_config.secret)?;

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

/// Extracts the token from `Authorization: Bearer <token>`.
/// The scheme is matched case-insensitively.
fn bearer_token(headers: &HeaderMap) -> AppResult<&str> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?
        .to_str()
        .map_err(|_| AppError::unauthorized("Invalid authorization header"))?;

    match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() => {
            Ok(token.trim())
        }
        _ => Err(AppError::unauthorized(
            "Invalid authorization header format. Expected: Bearer <token>",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_auth_user_from_claims() {
        let claims = Claims::new("u1", 1);
        assert_eq!(AuthUser::from(claims).user_id, "u1");
    }

    #[test]
    fn test_bearer_token_extracted() {
        assert_eq!(bearer_token(&headers_with("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
        assert_eq!(bearer_token(&headers_with("bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_missing_header() {
        match bearer_token(&HeaderMap::new()) {
            Err(AppError::Unauthorized { message }) => {
                assert_eq!(message, "Missing authorization header")
            }
            other => panic!("Expected Unauthorized, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_scheme_or_empty_token() {
        for value in ["Basic dXNlcjpwYXNz", "Bearer ", "Bearer", "abc.def.ghi"] {
            assert!(
                matches!(bearer_token(&headers_with(value)), Err(AppError::Unauthorized { .. })),
                "{value}"
            );
        }
    }
}
