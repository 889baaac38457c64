//! JWT access tokens
//!
//! Tokens carry the user id in `sub` and the administrator flag in `admin`,
//! so admin-only routes can be gated without a database round trip.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sprint_core::Snowflake;

use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Whether the subject is an administrator
    #[serde(default)]
    pub admin: bool,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Get the user ID as a Snowflake
    pub fn user_id(&self) -> Result<Snowflake, AppError> {
        Snowflake::parse(&self.sub).map_err(|_| AppError::InvalidToken)
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Signed access token handed to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Issues and validates HS256 access tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
}

impl JwtService {
    /// Create a service with the shared secret and token lifetime in seconds
    #[must_use]
    pub fn new(secret: &str, access_token_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry,
        }
    }

    /// Issue an access token for a user
    pub fn issue(&self, user_id: Snowflake, admin: bool) -> Result<AccessToken, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            admin,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.access_token_expiry)).timestamp(),
        };

        let access_token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode JWT: {e}")))?;

        Ok(AccessToken {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }

    /// Decode and validate a token
    pub fn validate(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry", &self.access_token_expiry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test-secret-key-that-is-long-enough", 900)
    }

    #[test]
    fn test_issue_and_validate() {
        let service = service();
        let token = service.issue(Snowflake::new(12345), true).unwrap();
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 900);

        let claims = service.validate(&token.access_token).unwrap();
        assert_eq!(claims.user_id().unwrap(), Snowflake::new(12345));
        assert!(claims.admin);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_non_admin_claim() {
        let service = service();
        let token = service.issue(Snowflake::new(7), false).unwrap();
        assert!(!service.validate(&token.access_token).unwrap().admin);
    }

    #[test]
    fn test_invalid_token() {
        assert!(matches!(
            service().validate("invalid.token.here"),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = service().issue(Snowflake::new(1), false).unwrap();
        let other = JwtService::new("a-completely-different-secret-value", 900);
        assert!(matches!(other.validate(&token.access_token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_expired_token() {
        // Expired well past the default 60s leeway
        let service = JwtService::new("test-secret-key-that-is-long-enough", -3600);
        let token = service.issue(Snowflake::new(1), false).unwrap();
        assert!(matches!(
            service.validate(&token.access_token),
            Err(AppError::TokenExpired)
        ));
    }

    #[test]
    fn test_claims_with_bad_subject() {
        let claims = Claims {
            sub: "not-an-id".to_string(),
            admin: false,
            iat: 0,
            exp: i64::MAX,
        };
        assert!(matches!(claims.user_id(), Err(AppError::InvalidToken)));
    }
}
