use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers::groups};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/groups/", get(groups::list_groups).post(groups::create_group))
        .route("/api/groups/pending-invites/", get(groups::pending_invites))
        .route("/api/groups/remove-member/", post(groups::remove_member))
        .route("/api/groups/transfer-ownership/", post(groups::transfer_ownership))
        .route(
            "/api/groups/:id/",
            get(groups::get_group)
                .put(groups::update_group)
                .delete(groups::delete_group),
        )
        .route("/api/groups/:id/members/", get(groups::group_members))
        .route("/api/groups/:id/invite/", post(groups::invite_user))
        .route("/api/groups/:id/accept/", post(groups::accept_invite))
        .route("/api/groups/:id/reject/", post(groups::reject_invite))
}
