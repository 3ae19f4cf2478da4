//! # Group Handlers
//!
//! Team management: creation, membership, invitations and ownership.
//!
//! Visibility follows membership. Only accepted members can see a group;
//! for everyone else it does not exist (404). Mutations that need ownership
//! answer 403 to members who are not the owner.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use timemesh_core::{
    errors::{ErrorCode, TimeError, TimeResult},
    models::group::{
        DetailResponse, Group, GroupRequest, Invite, InviteRequest, Membership, RemoveMemberRequest,
        TransferOwnershipRequest,
    },
};
use timemesh_db::{
    DbPool,
    models::{DbGroup, DbUser},
    repositories::group,
    store::{GroupStore, UserStore},
};

use crate::{
    ApiState,
    middleware::{auth::AuthUser, error_handling::AppError},
};

pub const MAX_GROUP_NAME_LENGTH: usize = 100;

/// Trims and checks a create/update payload, returning the name and description to store.
pub fn validate_group_request(payload: &GroupRequest) -> TimeResult<(String, String)> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(TimeError::Validation("Group name is required".to_string()));
    }
    if name.chars().count() > MAX_GROUP_NAME_LENGTH {
        return Err(TimeError::Validation(format!(
            "Group name must be at most {} characters",
            MAX_GROUP_NAME_LENGTH
        )));
    }
    Ok((name.to_string(), payload.description.trim().to_string()))
}

/// Decides whether `caller_id` may remove `target_id` from a group owned by `owner_id`.
///
/// The owner removes anyone but themselves; any other member may only leave.
pub fn check_removal(owner_id: i64, caller_id: i64, target_id: i64) -> TimeResult<()> {
    if target_id == owner_id {
        return Err(TimeError::Validation(
            "The group owner cannot be removed; transfer ownership first".to_string(),
        ));
    }
    if caller_id != owner_id && caller_id != target_id {
        return Err(TimeError::Authorization(
            "Only the group owner can remove other members".to_string(),
        ));
    }
    Ok(())
}

async fn group_with_members(pool: &DbPool, db_group: DbGroup) -> eyre::Result<Group> {
    let members = group::list_member_users(pool, db_group.id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(db_group.into_group(members))
}

fn group_not_found(group_id: i64) -> TimeError {
    TimeError::NotFound(format!("Group {} not found", group_id))
}

fn no_pending_invite() -> TimeError {
    TimeError::conflict(
        ErrorCode::NoPendingInvite,
        "You have no pending invite for this group",
    )
}

fn already_invited() -> TimeError {
    TimeError::conflict(
        ErrorCode::AlreadyInvited,
        "User already invited or already a member",
    )
}

async fn is_accepted<S>(store: &S, group_id: i64, user_id: i64) -> TimeResult<bool>
where
    S: GroupStore + ?Sized,
{
    let membership = store.membership(group_id, user_id).await?;
    Ok(membership.is_some_and(|m| m.accepted))
}

/// Loads a group the caller is an accepted member of.
///
/// Missing groups and groups the caller cannot see both answer 404.
pub async fn member_group<S>(store: &S, group_id: i64, user_id: i64) -> TimeResult<DbGroup>
where
    S: GroupStore + ?Sized,
{
    let db_group = store.find_group(group_id).await?.ok_or_else(|| group_not_found(group_id))?;
    if !is_accepted(store, group_id, user_id).await? {
        return Err(group_not_found(group_id));
    }
    Ok(db_group)
}

/// Loads a group the caller owns.
pub async fn owned_group<S>(store: &S, group_id: i64, user_id: i64) -> TimeResult<DbGroup>
where
    S: GroupStore + ?Sized,
{
    let db_group = member_group(store, group_id, user_id).await?;
    if db_group.owner_id != user_id {
        return Err(TimeError::Authorization("Only the group owner can do this".to_string()));
    }
    Ok(db_group)
}

/// Invites `username` to a group owned by `caller_id`, returning the invitee.
pub async fn invite_member<S>(store: &S, group_id: i64, caller_id: i64, username: &str) -> TimeResult<DbUser>
where
    S: GroupStore + UserStore + ?Sized,
{
    owned_group(store, group_id, caller_id).await?;

    let username = username.trim();
    let invitee = store.find_user_by_username(username).await?.ok_or_else(|| {
        TimeError::missing(ErrorCode::UserNotFound, format!("User {} not found", username))
    })?;

    if store.membership(group_id, invitee.id).await?.is_some() {
        return Err(already_invited());
    }
    // A concurrent invite may land between the check and the insert
    if store.insert_invite(group_id, invitee.id, caller_id).await?.is_none() {
        return Err(already_invited());
    }

    Ok(invitee)
}

/// Accepts or rejects the caller's pending invite to a group.
pub async fn answer_invite<S>(store: &S, group_id: i64, user_id: i64, accept: bool) -> TimeResult<()>
where
    S: GroupStore + ?Sized,
{
    store.find_group(group_id).await?.ok_or_else(|| group_not_found(group_id))?;

    let answered = if accept {
        store.accept_invite(group_id, user_id).await?
    } else {
        store.reject_invite(group_id, user_id).await?
    };
    if !answered {
        return Err(no_pending_invite());
    }
    Ok(())
}

/// Removes `target_id` from a group, enforcing [`check_removal`].
pub async fn remove_from_group<S>(store: &S, group_id: i64, caller_id: i64, target_id: i64) -> TimeResult<()>
where
    S: GroupStore + ?Sized,
{
    let db_group = member_group(store, group_id, caller_id).await?;
    check_removal(db_group.owner_id, caller_id, target_id)?;

    if !store.remove_member(group_id, target_id).await? {
        return Err(TimeError::NotFound("User is not a member of this group".to_string()));
    }
    Ok(())
}

/// Hands ownership of a group from `caller_id` to another accepted member.
pub async fn hand_over_ownership<S>(store: &S, group_id: i64, caller_id: i64, new_owner_id: i64) -> TimeResult<()>
where
    S: GroupStore + ?Sized,
{
    let db_group = owned_group(store, group_id, caller_id).await?;

    if new_owner_id == db_group.owner_id {
        return Err(TimeError::Validation("User already owns this group".to_string()));
    }
    if !is_accepted(store, group_id, new_owner_id).await? {
        return Err(TimeError::Validation(
            "Ownership can only be transferred to an accepted member".to_string(),
        ));
    }

    store.transfer_ownership(group_id, new_owner_id).await?;
    Ok(())
}

#[axum::debug_handler]
pub async fn list_groups(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
) -> Result<Json<Vec<Group>>, AppError> {
    let db_groups = group::list_groups_for_member(&state.db_pool, caller.id()).await?;

    let mut groups = Vec::with_capacity(db_groups.len());
    for db_group in db_groups {
        groups.push(group_with_members(&state.db_pool, db_group).await?);
    }

    Ok(Json(groups))
}

#[axum::debug_handler]
pub async fn create_group(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    Json(payload): Json<GroupRequest>,
) -> Result<(StatusCode, Json<Group>), AppError> {
    let (name, description) = validate_group_request(&payload)?;

    let db_group = group::create_group(&state.db_pool, caller.id(), &name, &description).await?;
    tracing::info!("User {} created group {}", caller.id(), db_group.id);

    let created = group_with_members(&state.db_pool, db_group).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[axum::debug_handler]
pub async fn get_group(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Group>, AppError> {
    let db_group = member_group(&state.db_pool, id, caller.id()).await?;
    Ok(Json(group_with_members(&state.db_pool, db_group).await?))
}

#[axum::debug_handler]
pub async fn update_group(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<GroupRequest>,
) -> Result<Json<Group>, AppError> {
    owned_group(&state.db_pool, id, caller.id()).await?;
    let (name, description) = validate_group_request(&payload)?;

    group::update_group(&state.db_pool, id, &name, &description).await?;

    let db_group = group::get_group_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| group_not_found(id))?;
    Ok(Json(group_with_members(&state.db_pool, db_group).await?))
}

#[axum::debug_handler]
pub async fn delete_group(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    owned_group(&state.db_pool, id, caller.id()).await?;
    group::delete_group(&state.db_pool, id).await?;
    tracing::info!("User {} deleted group {}", caller.id(), id);

    Ok(StatusCode::NO_CONTENT)
}

/// Accepted memberships of a group; empty for callers outside it.
#[axum::debug_handler]
pub async fn group_members(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Membership>>, AppError> {
    if !is_accepted(&state.db_pool, id, caller.id()).await? {
        return Ok(Json(Vec::new()));
    }

    let memberships = group::list_memberships(&state.db_pool, id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(memberships))
}

#[axum::debug_handler]
pub async fn invite_user(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<InviteRequest>,
) -> Result<Json<DetailResponse>, AppError> {
    let invitee = invite_member(&state.db_pool, id, caller.id(), &payload.username).await?;
    tracing::info!("User {} invited {} to group {}", caller.id(), invitee.id, id);

    Ok(Json(DetailResponse::new(format!("Invitation sent to {}", invitee.username))))
}

#[axum::debug_handler]
pub async fn accept_invite(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<DetailResponse>, AppError> {
    answer_invite(&state.db_pool, id, caller.id(), true).await?;
    Ok(Json(DetailResponse::new("Invitation accepted")))
}

#[axum::debug_handler]
pub async fn reject_invite(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<DetailResponse>, AppError> {
    answer_invite(&state.db_pool, id, caller.id(), false).await?;
    Ok(Json(DetailResponse::new("Invitation rejected")))
}

#[axum::debug_handler]
pub async fn pending_invites(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
) -> Result<Json<Vec<Invite>>, AppError> {
    let invites = group::pending_invites_for_user(&state.db_pool, caller.id())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(invites))
}

#[axum::debug_handler]
pub async fn remove_member(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    Json(payload): Json<RemoveMemberRequest>,
) -> Result<Json<DetailResponse>, AppError> {
    remove_from_group(&state.db_pool, payload.group_id, caller.id(), payload.user_id).await?;
    tracing::info!(
        "User {} removed {} from group {}",
        caller.id(),
        payload.user_id,
        payload.group_id
    );

    Ok(Json(DetailResponse::new("Member removed")))
}

#[axum::debug_handler]
pub async fn transfer_ownership(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    Json(payload): Json<TransferOwnershipRequest>,
) -> Result<Json<DetailResponse>, AppError> {
    hand_over_ownership(&state.db_pool, payload.group_id, caller.id(), payload.user_id).await?;
    tracing::info!(
        "Group {} ownership moved from {} to {}",
        payload.group_id,
        caller.id(),
        payload.user_id
    );

    Ok(Json(DetailResponse::new("Ownership transferred")))
}
