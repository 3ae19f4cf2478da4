//! # Availability Handlers
//!
//! Common-availability queries for a whole group or an explicit set of users
//! on a single date. Slot loading happens here; the window computation
//! itself lives in `timemesh_core::matching`.

use axum::{
    Json,
    extract::{Path, State},
};
use std::{collections::HashMap, sync::Arc};
use timemesh_core::{
    errors::{TimeError, TimeResult},
    matching::{self, MemberAvailability, MemberSlot},
    models::availability::{CommonAvailabilitySlot, GroupMatchRequest, UsersMatchRequest},
};
use timemesh_db::{
    DbPool,
    models::DbMemberSlot,
    repositories::{group, time_slot},
    store::{GroupStore, UserStore},
};

use crate::{
    ApiState,
    handlers::groups::member_group,
    middleware::{auth::AuthUser, error_handling::AppError},
};

/// Groups slot rows by member, keeping the order of `members`.
///
/// Members without any slot still appear with an empty list so they count
/// towards the "everyone available" requirement.
pub fn collect_member_slots(members: &[(i64, String)], rows: Vec<DbMemberSlot>) -> Vec<MemberAvailability> {
    let mut by_user: HashMap<i64, Vec<MemberSlot>> = HashMap::new();
    for row in rows {
        by_user.entry(row.user_id).or_default().push(MemberSlot {
            start_time: row.start_time,
            end_time: row.end_time,
            title: row.title,
            is_available: row.is_available,
        });
    }

    members
        .iter()
        .map(|(id, username)| MemberAvailability {
            username: username.clone(),
            slots: by_user.remove(id).unwrap_or_default(),
        })
        .collect()
}

async fn common_for(
    pool: &DbPool,
    members: &[(i64, String)],
    date: chrono::NaiveDate,
) -> eyre::Result<Vec<CommonAvailabilitySlot>> {
    let ids: Vec<i64> = members.iter().map(|(id, _)| *id).collect();
    let rows = time_slot::get_time_slots_for_users_on_date(pool, &ids, date).await?;
    let availability = collect_member_slots(members, rows);

    Ok(matching::common_availability(date, &availability))
}

/// Windows on a date where every accepted member of the group is available.
#[axum::debug_handler]
pub async fn group_common_availability(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<GroupMatchRequest>,
) -> Result<Json<Vec<CommonAvailabilitySlot>>, AppError> {
    member_group(&state.db_pool, id, caller.id()).await?;

    let members: Vec<(i64, String)> = group::list_member_users(&state.db_pool, id)
        .await?
        .into_iter()
        .map(|member| (member.id, member.username))
        .collect();

    let windows = common_for(&state.db_pool, &members, payload.date).await?;
    tracing::debug!("Group {} on {}: {} common windows", id, payload.date, windows.len());

    Ok(Json(windows))
}

/// Resolves the users of an explicit match request, in id order without duplicates.
///
/// Each listed user must be the caller or share an accepted group with them.
pub async fn visible_members<S>(store: &S, caller_id: i64, requested: &[i64]) -> TimeResult<Vec<(i64, String)>>
where
    S: GroupStore + UserStore + ?Sized,
{
    let mut user_ids = requested.to_vec();
    user_ids.sort_unstable();
    user_ids.dedup();

    if user_ids.is_empty() {
        return Err(TimeError::Validation("At least one user must be provided".to_string()));
    }

    let mut members = Vec::with_capacity(user_ids.len());
    for user_id in user_ids {
        let found = store
            .find_user(user_id)
            .await?
            .ok_or_else(|| TimeError::NotFound(format!("User {} not found", user_id)))?;

        if found.id != caller_id && !store.share_group(caller_id, found.id).await? {
            return Err(TimeError::Authorization(format!(
                "User {} does not share a group with you",
                found.username
            )));
        }

        members.push((found.id, found.username));
    }

    Ok(members)
}

/// Windows on a date where every listed user is available.
#[axum::debug_handler]
pub async fn users_common_availability(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    Json(payload): Json<UsersMatchRequest>,
) -> Result<Json<Vec<CommonAvailabilitySlot>>, AppError> {
    let members = visible_members(&state.db_pool, caller.id(), &payload.users).await?;

    let windows = common_for(&state.db_pool, &members, payload.date).await?;
    Ok(Json(windows))
}
