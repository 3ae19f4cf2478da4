//! # Availability Slot Handlers
//!
//! CRUD for the caller's own slots plus the batch endpoints used by the
//! calendar. Batch operations never fail as a whole because of a single bad
//! item: each rejected slot is reported in `errors` and the rest proceed.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;
use timemesh_core::{
    errors::{TimeError, TimeResult},
    models::time_slot::{
        BatchCreateRequest, BatchCreateResponse, BatchDeleteRequest, BatchDeleteResponse, SlotError,
        SlotInput, SlotRange, TimeSlot,
    },
    recurrence,
};
use timemesh_db::{models::NewSlot, repositories::time_slot, store::SlotStore};

use crate::{
    ApiState,
    middleware::{auth::AuthUser, error_handling::AppError},
};

pub const MAX_TITLE_LENGTH: usize = 100;

/// Checks the time range and title of an input and returns the values to store.
pub fn validate_slot(input: &SlotInput) -> TimeResult<NewSlot> {
    if input.start_time >= input.end_time {
        return Err(TimeError::Validation(
            "Start time must be before end time".to_string(),
        ));
    }

    let title = input.title.trim();
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(TimeError::Validation(format!(
            "Title must be at most {} characters",
            MAX_TITLE_LENGTH
        )));
    }

    Ok(NewSlot {
        date: input.date,
        start_time: input.start_time,
        end_time: input.end_time,
        title: title.to_string(),
        is_available: input.is_available,
    })
}

/// Expands and writes every input of a batch, collecting per-slot failures.
pub async fn apply_batch_create(
    store: &dyn SlotStore,
    user_id: i64,
    request: &BatchCreateRequest,
) -> BatchCreateResponse {
    let mut response = BatchCreateResponse::default();

    for input in &request.slots {
        let validated = validate_slot(input).and_then(|slot| Ok((slot, recurrence::expand(input)?)));
        let (template, occurrences) = match validated {
            Ok(ok) => ok,
            Err(e) => {
                response.errors.push(SlotError {
                    slot: input.key(),
                    error: e.to_string(),
                });
                continue;
            }
        };

        for occurrence in occurrences {
            let slot = NewSlot {
                date: occurrence.date,
                ..template.clone()
            };

            match store.upsert_slot(user_id, &slot).await {
                Ok(saved) => response.created.push(saved.into()),
                Err(e) => {
                    tracing::warn!("Failed to save slot {} {} for user {}: {}", slot.date, slot.start_time, user_id, e);
                    response.errors.push(SlotError {
                        slot: occurrence.key(),
                        error: "Could not save slot".to_string(),
                    });
                }
            }
        }
    }

    response
}

/// Deletes every listed slot; keys without a stored slot are skipped silently.
pub async fn apply_batch_delete(
    store: &dyn SlotStore,
    user_id: i64,
    request: &BatchDeleteRequest,
) -> BatchDeleteResponse {
    let mut response = BatchDeleteResponse::default();

    for key in &request.slots {
        match store.delete_slot_at(user_id, key.date, key.start_time).await {
            Ok(removed) => response.deleted += removed as usize,
            Err(e) => {
                tracing::warn!("Failed to delete slot {} {} for user {}: {}", key.date, key.start_time, user_id, e);
                response.errors.push(SlotError {
                    slot: *key,
                    error: "Could not delete slot".to_string(),
                });
            }
        }
    }

    response
}

#[axum::debug_handler]
pub async fn list_slots(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    Query(range): Query<SlotRange>,
) -> Result<Json<Vec<TimeSlot>>, AppError> {
    if let (Some(start), Some(end)) = (range.start_date, range.end_date) {
        if start > end {
            return Err(TimeError::Validation("start_date must not be after end_date".to_string()).into());
        }
    }

    let slots = time_slot::get_time_slots_by_user_id(&state.db_pool, caller.id(), range.start_date, range.end_date)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(slots))
}

#[axum::debug_handler]
pub async fn create_slot(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    Json(payload): Json<SlotInput>,
) -> Result<(StatusCode, Json<TimeSlot>), AppError> {
    if payload.recurrence.is_some() {
        return Err(TimeError::Validation(
            "Recurring slots must be created through batch_create".to_string(),
        )
        .into());
    }

    let slot = validate_slot(&payload)?;
    let saved = state.db_pool.upsert_slot(caller.id(), &slot).await?;

    Ok((StatusCode::CREATED, Json(saved.into())))
}

#[axum::debug_handler]
pub async fn delete_slot(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !time_slot::delete_time_slot_by_id(&state.db_pool, caller.id(), id).await? {
        return Err(TimeError::NotFound(format!("Slot {} not found", id)).into());
    }

    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn batch_create(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    Json(payload): Json<BatchCreateRequest>,
) -> Result<(StatusCode, Json<BatchCreateResponse>), AppError> {
    let response = apply_batch_create(&state.db_pool, caller.id(), &payload).await;
    tracing::info!(
        "Batch create for user {}: {} created, {} rejected",
        caller.id(),
        response.created.len(),
        response.errors.len()
    );

    Ok((StatusCode::CREATED, Json(response)))
}

#[axum::debug_handler]
pub async fn batch_delete(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    Json(payload): Json<BatchDeleteRequest>,
) -> Result<Json<BatchDeleteResponse>, AppError> {
    let response = apply_batch_delete(&state.db_pool, caller.id(), &payload).await;
    tracing::info!(
        "Batch delete for user {}: {} deleted, {} failed",
        caller.id(),
        response.deleted,
        response.errors.len()
    );

    Ok(Json(response))
}
