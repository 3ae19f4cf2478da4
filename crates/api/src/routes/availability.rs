use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::{
    ApiState,
    handlers::{availability, slots},
};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/availability/slots/",
            get(slots::list_slots).post(slots::create_slot),
        )
        .route("/api/availability/slots/batch_create/", post(slots::batch_create))
        .route("/api/availability/slots/batch_delete/", post(slots::batch_delete))
        .route("/api/availability/slots/:id/", delete(slots::delete_slot))
        .route(
            "/api/availability/group/:id/match/",
            post(availability::group_common_availability),
        )
        .route("/api/availability/match/", post(availability::users_common_availability))
}
