use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create users table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            username VARCHAR(150) NOT NULL UNIQUE,
            email VARCHAR(255) NOT NULL UNIQUE,
            password_hash VARCHAR(255) NOT NULL,
            first_name VARCHAR(150) NOT NULL DEFAULT '',
            last_name VARCHAR(150) NOT NULL DEFAULT '',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create auth_tokens table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS auth_tokens (
            token VARCHAR(128) PRIMARY KEY,
            user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            kind VARCHAR(16) NOT NULL,
            expires_at TIMESTAMP WITH TIME ZONE NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_token_kind CHECK (kind IN ('access', 'refresh'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create groups table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS groups (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            owner_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create group_memberships table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS group_memberships (
            id BIGSERIAL PRIMARY KEY,
            group_id BIGINT NOT NULL REFERENCES groups(id) ON DELETE CASCADE,
            user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            invited_by BIGINT NULL REFERENCES users(id) ON DELETE SET NULL,
            accepted BOOLEAN NOT NULL DEFAULT FALSE,
            invited_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            accepted_at TIMESTAMP WITH TIME ZONE NULL,
            UNIQUE (group_id, user_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Databases created before invite statistics lack accepted_at
    sqlx::query("ALTER TABLE group_memberships ADD COLUMN IF NOT EXISTS accepted_at TIMESTAMP WITH TIME ZONE NULL")
        .execute(pool)
        .await?;

    // Create availability_slots table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS availability_slots (
            id BIGSERIAL PRIMARY KEY,
            user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            date DATE NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            title VARCHAR(100) NOT NULL DEFAULT '',
            is_available BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_slot_range CHECK (end_time > start_time),
            UNIQUE (user_id, date, start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_auth_tokens_user_id ON auth_tokens(user_id);
        CREATE INDEX IF NOT EXISTS idx_auth_tokens_expires_at ON auth_tokens(expires_at);
        CREATE INDEX IF NOT EXISTS idx_groups_owner_id ON groups(owner_id);
        CREATE INDEX IF NOT EXISTS idx_group_memberships_group_id ON group_memberships(group_id);
        CREATE INDEX IF NOT EXISTS idx_group_memberships_user_id ON group_memberships(user_id);
        CREATE INDEX IF NOT EXISTS idx_availability_slots_user_date ON availability_slots(user_id, date);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
