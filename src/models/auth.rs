//! Login accounts and JWT claims
//!
//! Login accounts are the API credentials; they are unrelated to the renters
//! in [`crate::models::user`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Login account from database
#[derive(Debug, Clone, FromRow)]
pub struct LoginUser {
    pub id: i32,
    pub email: String,
    /// Argon2 hash, never the plain password
    pub password: String,
    pub created_at: DateTime<Utc>,
}

/// Register request for a new login account
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateLogin {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// JWT Claims for authenticated API clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthClaims {
    pub sub: String,
    pub login_id: i32,
    pub exp: i64,
    pub iat: i64,
}

impl AuthClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trip_preserves_claims() {
        let now = Utc::now().timestamp();
        let claims = AuthClaims {
            sub: "reader@example.com".to_string(),
            login_id: 7,
            exp: now + 3600,
            iat: now,
        };

        let token = claims.create_token("secret").unwrap();
        let parsed = AuthClaims::from_token(&token, "secret").unwrap();
        assert_eq!(parsed.sub, "reader@example.com");
        assert_eq!(parsed.login_id, 7);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = AuthClaims {
            sub: "reader@example.com".to_string(),
            login_id: 7,
            exp: now + 3600,
            iat: now,
        };

        let token = claims.create_token("secret").unwrap();
        assert!(AuthClaims::from_token(&token, "other-secret").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = AuthClaims {
            sub: "reader@example.com".to_string(),
            login_id: 7,
            exp: now - 3600,
            iat: now - 7200,
        };

        let token = claims.create_token("secret").unwrap();
        assert!(AuthClaims::from_token(&token, "secret").is_err());
    }
}
