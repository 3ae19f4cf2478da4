use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/users/register/", post(handlers::users::register))
        .route("/api/users/me/", get(handlers::users::me))
}
