use axum::{Json, extract::State};
use std::sync::Arc;
use timemesh_core::{
    errors::{ErrorCode, TimeError},
    models::user::{LoginRequest, RefreshRequest, RefreshResponse, TokenPair},
};
use timemesh_db::{
    DbPool,
    models::{DbUser, TokenKind},
    repositories::{token, user},
};

use crate::{
    ApiState, TokenSettings,
    middleware::{auth as credentials, error_handling::AppError},
};

/// Issues an access/refresh token pair for a username (or email) and password.
#[axum::debug_handler]
pub async fn obtain_token(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenPair>, AppError> {
    let invalid = || {
        TimeError::credentials(
            ErrorCode::InvalidCredentials,
            "No active account found with the given credentials",
        )
    };

    let db_user = find_login_user(&state.db_pool, payload.username.trim())
        .await?
        .ok_or_else(invalid)?;

    if !credentials::verify_password(&payload.password, &db_user.password_hash)? {
        tracing::info!("Rejected login for {}", db_user.username);
        return Err(invalid().into());
    }

    let pair = issue_token_pair(&state.db_pool, &state.tokens, db_user.id).await?;
    tracing::info!("Issued tokens for user {}", db_user.id);

    Ok(Json(pair))
}

/// Exchanges a valid refresh token for a new access token.
#[axum::debug_handler]
pub async fn refresh_token(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, AppError> {
    let record = token::find_valid_token(&state.db_pool, &payload.refresh, TokenKind::Refresh)
        .await?
        .ok_or_else(|| TimeError::credentials(ErrorCode::TokenInvalid, "Token is invalid or expired"))?;

    let access = credentials::generate_token();
    token::create_token(
        &state.db_pool,
        &access,
        record.user_id,
        TokenKind::Access,
        state.tokens.access_ttl,
    )
    .await?;

    Ok(Json(RefreshResponse { access }))
}

async fn find_login_user(pool: &DbPool, login: &str) -> eyre::Result<Option<DbUser>> {
    if let Some(found) = user::get_user_by_username(pool, login).await? {
        return Ok(Some(found));
    }
    if login.contains('@') {
        return user::get_user_by_email(pool, login).await;
    }
    Ok(None)
}

pub async fn issue_token_pair(pool: &DbPool, settings: &TokenSettings, user_id: i64) -> eyre::Result<TokenPair> {
    let access = credentials::generate_token();
    let refresh = credentials::generate_token();

    token::create_token(pool, &access, user_id, TokenKind::Access, settings.access_ttl).await?;
    token::create_token(pool, &refresh, user_id, TokenKind::Refresh, settings.refresh_ttl).await?;

    Ok(TokenPair { access, refresh })
}
