use crate::models::{DbMemberSlot, DbSlot, NewSlot};
use chrono::{NaiveDate, NaiveTime};
use eyre::Result;
use sqlx::{Pool, Postgres};

const SLOT_COLUMNS: &str = "id, user_id, date, start_time, end_time, title, is_available, created_at";

/// Inserts a slot, replacing the one already stored at the same date and start time.
pub async fn upsert_time_slot(pool: &Pool<Postgres>, user_id: i64, slot: &NewSlot) -> Result<DbSlot> {
    let time_slot = sqlx::query_as::<_, DbSlot>(&format!(
        r#"
        INSERT INTO availability_slots (user_id, date, start_time, end_time, title, is_available)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (user_id, date, start_time)
        DO UPDATE SET end_time = EXCLUDED.end_time,
                      title = EXCLUDED.title,
                      is_available = EXCLUDED.is_available
        RETURNING {SLOT_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(slot.date)
    .bind(slot.start_time)
    .bind(slot.end_time)
    .bind(&slot.title)
    .bind(slot.is_available)
    .fetch_one(pool)
    .await?;

    Ok(time_slot)
}

pub async fn get_time_slots_by_user_id(
    pool: &Pool<Postgres>,
    user_id: i64,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<Vec<DbSlot>> {
    let time_slots = sqlx::query_as::<_, DbSlot>(&format!(
        r#"
        SELECT {SLOT_COLUMNS}
        FROM availability_slots
        WHERE user_id = $1
          AND ($2::DATE IS NULL OR date >= $2)
          AND ($3::DATE IS NULL OR date <= $3)
        ORDER BY date ASC, start_time ASC
        "#
    ))
    .bind(user_id)
    .bind(start_date)
    .bind(end_date)
    .fetch_all(pool)
    .await?;

    Ok(time_slots)
}

/// Slots of several users on one date, joined with usernames.
pub async fn get_time_slots_for_users_on_date(
    pool: &Pool<Postgres>,
    user_ids: &[i64],
    date: NaiveDate,
) -> Result<Vec<DbMemberSlot>> {
    let time_slots = sqlx::query_as::<_, DbMemberSlot>(
        r#"
        SELECT s.user_id, u.username, s.start_time, s.end_time, s.title, s.is_available
        FROM availability_slots s
        JOIN users u ON u.id = s.user_id
        WHERE s.user_id = ANY($1) AND s.date = $2
        ORDER BY s.start_time ASC
        "#,
    )
    .bind(user_ids)
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(time_slots)
}

pub async fn delete_time_slot_by_id(pool: &Pool<Postgres>, user_id: i64, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM availability_slots WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_time_slot_at(
    pool: &Pool<Postgres>,
    user_id: i64,
    date: NaiveDate,
    start_time: NaiveTime,
) -> Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM availability_slots
        WHERE user_id = $1 AND date = $2 AND start_time = $3
        "#,
    )
    .bind(user_id)
    .bind(date)
    .bind(start_time)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
