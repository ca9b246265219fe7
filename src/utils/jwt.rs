use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// JWT claims identifying the caller.
///
/// Tokens are minted by the account service; this service only verifies
/// them and reads the user id from `sub`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (timestamp)
    pub iat: i64,
    /// Expiration time (timestamp)
    pub exp: i64,
}

impl Claims {
    /// Creates claims for `user_id` valid for `expiration_hours`.
    pub fn new(user_id: &str, expiration_hours: i64) -> Self {
        let now = jiff::Timestamp::now().as_second();

        Self {
            sub: user_id.to_string(),
            iat: now,
            exp: now + expiration_hours * 3600,
        }
    }
}

/// Generates a signed access token for a user
///
/// # Arguments
/// * `user_id` - The user's ID
/// * `secret` - The secret key for signing the token
/// * `expiration_hours` - Token validity duration in hours
pub fn generate_access_token(user_id: &str, secret: &str, expiration_hours: i64) -> AppResult<String> {
    let claims = Claims::new(user_id, expiration_hours);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::internal("Failed to generate JWT token", e))
}

/// Validates and decodes an access token
///
/// # Returns
/// The decoded claims if the signature, expiry and subject are valid
pub fn validate_access_token(token: &str, secret: &str) -> AppResult<Claims> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::unauthorized("Token has expired")
        }
        jsonwebtoken::errors::ErrorKind::InvalidSignature => {
            AppError::unauthorized("Invalid token signature")
        }
        _ => AppError::unauthorized("Invalid token"),
    })?;

    if claims.sub.trim().is_empty() {
        return Err(AppError::unauthorized("Token has no subject"));
    }

    Ok(claims)
}
