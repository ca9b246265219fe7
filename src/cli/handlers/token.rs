//! Token command handler
//!
//! Mints a bearer token signed with the configured secret so the API can
//! be exercised locally without the account service.

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult, FieldError};
use crate::utils::jwt::generate_access_token;

/// Handler for the token command
pub struct TokenCommandHandler {
    jwt: JwtConfig,
}

impl TokenCommandHandler {
    pub fn new(jwt: JwtConfig) -> Self {
        Self { jwt }
    }

    /// Issues a token for `user_id`, valid for `hours` or the configured
    /// access token expiration.
    ///
    /// # Errors
    /// - JWT configuration validation errors
    /// - Non-positive `hours`
    pub fn issue(&self, user_id: &str, hours: Option<i64>) -> AppResult<String> {
        self.jwt.validate()?;

        let hours = hours.unwrap_or(self.jwt.access_token_expiration);
        if hours <= 0 {
            return Err(AppError::Validation {
                errors: vec![FieldError {
                    field: "hours".to_string(),
                    message: "Token lifetime must be at least 1 hour".to_string(),
                }],
            });
        }

        let token = generate_access_token(user_id, &self.jwt.secret, hours)?;
        tracing::debug!(user_id = %user_id, hours, "Issued access token");
        Ok(token)
    }

    /// Issues the token and prints it to stdout.
    pub fn execute(&self, user_id: &str, hours: Option<i64>) -> AppResult<()> {
        println!("{}", self.issue(user_id, hours)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::validate_access_token;

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "token-command-secret-long-enough-for-hs256".to_string(),
            ..JwtConfig::default()
        }
    }

    #[test]
    fn test_issued_token_verifies() {
        let handler = TokenCommandHandler::new(jwt_config());
        let token = handler.issue("u1", Some(2)).unwrap();

        let claims = validate_access_token(&token, &jwt_config().secret).unwrap();
        assert_eq!(claims.sub, "u1");
        assert_eq!(claims.exp - claims.iat, 2 * 3600);
    }

    #[test]
    fn test_default_lifetime_from_config() {
        let config = jwt_config();
        let token = TokenCommandHandler::new(config.clone()).issue("u1", None).unwrap();

        let claims = validate_access_token(&token, &config.secret).unwrap();
        assert_eq!(claims.exp - claims.iat, config.access_token_expiration * 3600);
    }

    #[test]
    fn test_rejects_bad_input() {
        let handler = TokenCommandHandler::new(jwt_config());
        assert!(matches!(
            handler.issue("u1", Some(0)),
            Err(AppError::Validation { .. })
        ));

        let handler = TokenCommandHandler::new(JwtConfig::default());
        assert!(matches!(
            handler.issue("u1", None),
            Err(AppError::Configuration { .. })
        ));
    }
}
