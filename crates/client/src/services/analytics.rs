use timemesh_core::models::analytics::{GroupInviteStats, UserStats};

use crate::{api::ApiClient, errors::ClientResult};

pub async fn user_stats(api: &ApiClient) -> ClientResult<UserStats> {
    api.get("/api/analytics/user-stats/").await
}

/// How the invites the caller sent in a group turned out.
pub async fn group_invite_stats(api: &ApiClient, group_id: i64) -> ClientResult<GroupInviteStats> {
    api.get(&format!("/api/analytics/group/{}/invite-stats/", group_id))
        .await
}
