use crate::models::{DbAuthToken, TokenKind};
use chrono::{Duration, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn create_token(
    pool: &Pool<Postgres>,
    token: &str,
    user_id: i64,
    kind: TokenKind,
    ttl: Duration,
) -> Result<DbAuthToken> {
    let now = Utc::now();

    let record = sqlx::query_as::<_, DbAuthToken>(
        r#"
        INSERT INTO auth_tokens (token, user_id, kind, expires_at, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING token, user_id, kind, expires_at, created_at
        "#,
    )
    .bind(token)
    .bind(user_id)
    .bind(kind.as_str())
    .bind(now + ttl)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(record)
}

/// Looks up an unexpired token of the given kind.
pub async fn find_valid_token(
    pool: &Pool<Postgres>,
    token: &str,
    kind: TokenKind,
) -> Result<Option<DbAuthToken>> {
    let record = sqlx::query_as::<_, DbAuthToken>(
        r#"
        SELECT token, user_id, kind, expires_at, created_at
        FROM auth_tokens
        WHERE token = $1 AND kind = $2 AND expires_at > NOW()
        "#,
    )
    .bind(token)
    .bind(kind.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

pub async fn delete_expired_tokens(pool: &Pool<Postgres>) -> Result<u64> {
    let result = sqlx::query("DELETE FROM auth_tokens WHERE expires_at <= NOW()")
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
