//! Authentication service: login accounts and token issuance

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::auth::{AuthClaims, CreateLogin},
    repository::Repository,
};

/// Issued token together with its lifetime in seconds
pub struct IssuedToken {
    pub token: String,
    pub expires_in: u64,
}

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Register a new login account
    pub async fn register(&self, login: CreateLogin) -> AppResult<i32> {
        login.validate()?;

        if self.repository.logins.email_exists(&login.email).await? {
            return Err(AppError::Conflict("Email is already registered.".to_string()));
        }

        let hash = self.hash_password(&login.password)?;
        self.repository.logins.create(&login.email, &hash).await
    }

    /// Authenticate by email and password, returning a JWT token
    pub async fn login(&self, email: &str, password: &str) -> AppResult<IssuedToken> {
        let account = self
            .repository
            .logins
            .get_by_email(email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid email or password".to_string()))?;

        if !self.verify_password(&account.password, password)? {
            return Err(AppError::Authentication("Invalid email or password".to_string()));
        }

        let now = Utc::now().timestamp();
        let expires_in = self.config.jwt_expiration_hours * 3600;

        let claims = AuthClaims {
            sub: account.email,
            login_id: account.id,
            exp: now + expires_in as i64,
            iat: now,
        };

        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        Ok(IssuedToken { token, expires_in })
    }

    fn verify_password(&self, hash: &str, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}
