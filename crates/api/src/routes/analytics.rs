use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers::analytics};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/analytics/user-stats/", get(analytics::user_stats))
        .route(
            "/api/analytics/group/:id/invite-stats/",
            get(analytics::group_invite_stats),
        )
}
