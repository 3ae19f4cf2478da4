//! # Analytics Handlers
//!
//! Read-only statistics over the caller's own slots and the invites they
//! sent within a group.

use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;
use timemesh_core::{
    analytics,
    errors::{TimeError, TimeResult},
    models::{
        analytics::{GroupInviteStats, UserStats},
        time_slot::TimeSlot,
    },
};
use timemesh_db::{repositories::time_slot, store::GroupStore};

use crate::{
    ApiState,
    middleware::{auth::AuthUser, error_handling::AppError},
};

/// Invite statistics of `caller_id` in a group.
///
/// A missing group answers 404; a group the caller is not an accepted member of answers 403.
pub async fn invite_stats_for<S>(store: &S, group_id: i64, caller_id: i64) -> TimeResult<GroupInviteStats>
where
    S: GroupStore + ?Sized,
{
    store
        .find_group(group_id)
        .await?
        .ok_or_else(|| TimeError::NotFound(format!("Group {} not found", group_id)))?;

    let membership = store.membership(group_id, caller_id).await?;
    if !membership.is_some_and(|m| m.accepted) {
        return Err(TimeError::Authorization("You are not a member of this group".to_string()));
    }

    let invites: Vec<analytics::InviteOutcome> = store
        .invites_sent_by(group_id, caller_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(analytics::invite_stats(&invites))
}

#[axum::debug_handler]
pub async fn user_stats(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
) -> Result<Json<UserStats>, AppError> {
    let slots: Vec<TimeSlot> = time_slot::get_time_slots_by_user_id(&state.db_pool, caller.id(), None, None)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(analytics::user_stats(&slots)))
}

#[axum::debug_handler]
pub async fn group_invite_stats(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<GroupInviteStats>, AppError> {
    let stats = invite_stats_for(&state.db_pool, id, caller.id()).await?;
    tracing::debug!("Invite stats for user {} in group {}: {:?}", caller.id(), id, stats);

    Ok(Json(stats))
}
