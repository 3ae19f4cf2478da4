//! # Authentication Module
//!
//! Password hashing, opaque token generation and the [`AuthUser`] extractor
//! that resolves a bearer token into the calling user.
//!
//! Tokens are random alphanumeric strings persisted in `auth_tokens` with a
//! kind (access or refresh) and an expiry; nothing is encoded in the token
//! itself.

use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use eyre::Result;
use rand::{Rng, distributions::Alphanumeric};
use timemesh_core::errors::{ErrorCode, TimeError};
use timemesh_db::{
    models::{DbUser, TokenKind},
    repositories::{token, user},
};

use crate::{ApiState, middleware::error_handling::AppError};

/// Length of generated access and refresh tokens
pub const TOKEN_LENGTH: usize = 48;

/// Hashes a password using the Argon2 algorithm
///
/// A fresh random salt is generated for every call and the result is returned
/// in PHC string format, so the same password never hashes to the same value twice.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Checks a plain text password against a stored PHC hash.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| eyre::eyre!("Stored password hash is malformed: {}", e))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Generates a new opaque token.
pub fn generate_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// The authenticated caller of a request.
///
/// Handlers take this as an argument to require a valid access token; the
/// request is rejected with 401 before the handler runs otherwise.
#[derive(Debug, Clone)]
pub struct AuthUser(pub DbUser);

impl AuthUser {
    pub fn id(&self) -> i64 {
        self.0.id
    }
}

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<ApiState>) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                TimeError::Authentication("Authentication credentials were not provided".to_string())
            })?;

        let token = bearer_token(header).ok_or_else(|| {
            TimeError::credentials(ErrorCode::TokenInvalid, "Authorization header must be a bearer token")
        })?;

        let record = token::find_valid_token(&state.db_pool, token, TokenKind::Access)
            .await?
            .ok_or_else(|| TimeError::credentials(ErrorCode::TokenInvalid, "Given token is invalid or expired"))?;

        let user = user::get_user_by_id(&state.db_pool, record.user_id)
            .await?
            .ok_or_else(|| TimeError::credentials(ErrorCode::TokenInvalid, "User for this token no longer exists"))?;

        tracing::debug!("Authenticated request for user {}", user.id);

        Ok(AuthUser(user))
    }
}
