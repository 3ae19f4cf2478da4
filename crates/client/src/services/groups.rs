use timemesh_core::models::group::{
    DetailResponse, Group, GroupRequest, Invite, InviteRequest, Membership, RemoveMemberRequest,
    TransferOwnershipRequest,
};

use crate::{
    api::ApiClient,
    errors::{ClientResult, InviteFailure},
};

pub async fn list_groups(api: &ApiClient) -> ClientResult<Vec<Group>> {
    api.get("/api/groups/").await
}

pub async fn get_group(api: &ApiClient, group_id: i64) -> ClientResult<Group> {
    api.get(&format!("/api/groups/{}/", group_id)).await
}

pub async fn create_group(api: &ApiClient, request: &GroupRequest) -> ClientResult<Group> {
    api.post("/api/groups/", request).await
}

pub async fn update_group(api: &ApiClient, group_id: i64, request: &GroupRequest) -> ClientResult<Group> {
    api.put(&format!("/api/groups/{}/", group_id), request).await
}

pub async fn delete_group(api: &ApiClient, group_id: i64) -> ClientResult<()> {
    api.delete(&format!("/api/groups/{}/", group_id)).await
}

pub async fn group_members(api: &ApiClient, group_id: i64) -> ClientResult<Vec<Membership>> {
    api.get(&format!("/api/groups/{}/members/", group_id)).await
}

pub async fn invite_user(api: &ApiClient, group_id: i64, username: &str) -> Result<DetailResponse, InviteFailure> {
    let request = InviteRequest {
        username: username.trim().to_string(),
    };
    api.post(&format!("/api/groups/{}/invite/", group_id), &request)
        .await
        .map_err(|e| {
            tracing::info!("Invite of {} to group {} failed: {}", request.username, group_id, e);
            InviteFailure::classify(&e)
        })
}

pub async fn accept_invite(api: &ApiClient, group_id: i64) -> ClientResult<DetailResponse> {
    api.post(&format!("/api/groups/{}/accept/", group_id), &serde_json::json!({})).await
}

pub async fn reject_invite(api: &ApiClient, group_id: i64) -> ClientResult<DetailResponse> {
    api.post(&format!("/api/groups/{}/reject/", group_id), &serde_json::json!({})).await
}

pub async fn pending_invites(api: &ApiClient) -> ClientResult<Vec<Invite>> {
    api.get("/api/groups/pending-invites/").await
}

pub async fn remove_member(api: &ApiClient, group_id: i64, user_id: i64) -> ClientResult<DetailResponse> {
    api.post("/api/groups/remove-member/", &RemoveMemberRequest { group_id, user_id })
        .await
}

pub async fn transfer_ownership(api: &ApiClient, group_id: i64, user_id: i64) -> ClientResult<DetailResponse> {
    api.post(
        "/api/groups/transfer-ownership/",
        &TransferOwnershipRequest { group_id, user_id },
    )
    .await
}
