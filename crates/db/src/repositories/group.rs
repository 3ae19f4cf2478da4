use crate::models::{DbGroup, DbInviteRecord, DbMembership, DbMembershipView, DbUser};
use chrono::Utc;
use eyre::{Result, eyre};
use sqlx::{Pool, Postgres};

const GROUP_SELECT: &str = r#"
    SELECT g.id, g.name, g.description, g.owner_id, u.username AS owner_username,
           g.created_at, g.updated_at
    FROM groups g
    JOIN users u ON u.id = g.owner_id
"#;

const MEMBERSHIP_SELECT: &str = r#"
    SELECT m.id, m.group_id, g.name AS group_name, u.username,
           inviter.username AS invited_by_username, m.accepted, m.invited_at
    FROM group_memberships m
    JOIN groups g ON g.id = m.group_id
    JOIN users u ON u.id = m.user_id
    LEFT JOIN users inviter ON inviter.id = m.invited_by
"#;

/// Creates a group owned by `owner_id` together with the owner's accepted membership.
pub async fn create_group(
    pool: &Pool<Postgres>,
    owner_id: i64,
    name: &str,
    description: &str,
) -> Result<DbGroup> {
    let mut tx = pool.begin().await?;
    let now = Utc::now();

    let group_id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO groups (name, description, owner_id, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $4)
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(description)
    .bind(owner_id)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO group_memberships (group_id, user_id, invited_by, accepted, invited_at, accepted_at)
        VALUES ($1, $2, $2, TRUE, $3, $3)
        "#,
    )
    .bind(group_id)
    .bind(owner_id)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::debug!("Group created: id={}, owner={}", group_id, owner_id);

    get_group_by_id(pool, group_id)
        .await?
        .ok_or_else(|| eyre!("Group {} vanished after creation", group_id))
}

pub async fn get_group_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbGroup>> {
    let group = sqlx::query_as::<_, DbGroup>(&format!("{GROUP_SELECT} WHERE g.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(group)
}

/// Groups where the user holds an accepted membership.
pub async fn list_groups_for_member(pool: &Pool<Postgres>, user_id: i64) -> Result<Vec<DbGroup>> {
    let groups = sqlx::query_as::<_, DbGroup>(&format!(
        r#"
        {GROUP_SELECT}
        JOIN group_memberships m ON m.group_id = g.id
        WHERE m.user_id = $1 AND m.accepted = TRUE
        ORDER BY g.created_at ASC
        "#
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(groups)
}

pub async fn update_group(
    pool: &Pool<Postgres>,
    id: i64,
    name: &str,
    description: &str,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE groups
        SET name = $2, description = $3, updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(description)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn delete_group(pool: &Pool<Postgres>, id: i64) -> Result<()> {
    sqlx::query("DELETE FROM groups WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Users holding an accepted membership in the group.
pub async fn list_member_users(pool: &Pool<Postgres>, group_id: i64) -> Result<Vec<DbUser>> {
    let users = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT u.id, u.username, u.email, u.password_hash, u.first_name, u.last_name, u.created_at
        FROM users u
        JOIN group_memberships m ON m.user_id = u.id
        WHERE m.group_id = $1 AND m.accepted = TRUE
        ORDER BY m.invited_at ASC
        "#,
    )
    .bind(group_id)
    .fetch_all(pool)
    .await?;

    Ok(users)
}

pub async fn list_memberships(pool: &Pool<Postgres>, group_id: i64) -> Result<Vec<DbMembershipView>> {
    let rows = sqlx::query_as::<_, DbMembershipView>(&format!(
        "{MEMBERSHIP_SELECT} WHERE m.group_id = $1 AND m.accepted = TRUE ORDER BY m.invited_at ASC"
    ))
    .bind(group_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_membership(
    pool: &Pool<Postgres>,
    group_id: i64,
    user_id: i64,
) -> Result<Option<DbMembership>> {
    let membership = sqlx::query_as::<_, DbMembership>(
        r#"
        SELECT id, group_id, user_id, invited_by, accepted, invited_at
        FROM group_memberships
        WHERE group_id = $1 AND user_id = $2
        "#,
    )
    .bind(group_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(membership)
}

pub async fn is_accepted_member(pool: &Pool<Postgres>, group_id: i64, user_id: i64) -> Result<bool> {
    let membership = get_membership(pool, group_id, user_id).await?;
    Ok(membership.is_some_and(|m| m.accepted))
}

/// Creates a pending invite. Returns `None` when the user already has a membership
/// row in the group, pending or accepted.
pub async fn create_invite(
    pool: &Pool<Postgres>,
    group_id: i64,
    user_id: i64,
    invited_by: i64,
) -> Result<Option<DbMembership>> {
    let membership = sqlx::query_as::<_, DbMembership>(
        r#"
        INSERT INTO group_memberships (group_id, user_id, invited_by, accepted, invited_at)
        VALUES ($1, $2, $3, FALSE, NOW())
        ON CONFLICT (group_id, user_id) DO NOTHING
        RETURNING id, group_id, user_id, invited_by, accepted, invited_at
        "#,
    )
    .bind(group_id)
    .bind(user_id)
    .bind(invited_by)
    .fetch_optional(pool)
    .await?;

    Ok(membership)
}

/// Marks a pending invite as accepted. Returns false when no pending invite exists.
pub async fn accept_invite(pool: &Pool<Postgres>, group_id: i64, user_id: i64) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE group_memberships
        SET accepted = TRUE, accepted_at = NOW()
        WHERE group_id = $1 AND user_id = $2 AND accepted = FALSE
        "#,
    )
    .bind(group_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Deletes a pending invite. Returns false when no pending invite exists.
pub async fn reject_invite(pool: &Pool<Postgres>, group_id: i64, user_id: i64) -> Result<bool> {
    let result = sqlx::query(
        "DELETE FROM group_memberships WHERE group_id = $1 AND user_id = $2 AND accepted = FALSE",
    )
    .bind(group_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn remove_member(pool: &Pool<Postgres>, group_id: i64, user_id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM group_memberships WHERE group_id = $1 AND user_id = $2")
        .bind(group_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn pending_invites_for_user(pool: &Pool<Postgres>, user_id: i64) -> Result<Vec<DbMembershipView>> {
    let rows = sqlx::query_as::<_, DbMembershipView>(&format!(
        "{MEMBERSHIP_SELECT} WHERE m.user_id = $1 AND m.accepted = FALSE ORDER BY m.invited_at DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn transfer_ownership(pool: &Pool<Postgres>, group_id: i64, new_owner_id: i64) -> Result<()> {
    sqlx::query("UPDATE groups SET owner_id = $2, updated_at = NOW() WHERE id = $1")
        .bind(group_id)
        .bind(new_owner_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Whether two users hold accepted memberships in at least one common group.
pub async fn users_share_group(pool: &Pool<Postgres>, user_a: i64, user_b: i64) -> Result<bool> {
    let shared = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM group_memberships a
            JOIN group_memberships b ON a.group_id = b.group_id
            WHERE a.user_id = $1 AND b.user_id = $2
              AND a.accepted = TRUE AND b.accepted = TRUE
        )
        "#,
    )
    .bind(user_a)
    .bind(user_b)
    .fetch_one(pool)
    .await?;

    Ok(shared)
}

/// Invites `inviter_id` sent in a group, excluding the owner's own membership.
pub async fn invites_sent_by(
    pool: &Pool<Postgres>,
    group_id: i64,
    inviter_id: i64,
) -> Result<Vec<DbInviteRecord>> {
    let rows = sqlx::query_as::<_, DbInviteRecord>(
        r#"
        SELECT accepted, invited_at, accepted_at
        FROM group_memberships
        WHERE group_id = $1 AND invited_by = $2 AND user_id <> invited_by
        ORDER BY invited_at ASC
        "#,
    )
    .bind(group_id)
    .bind(inviter_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
