use axum::{Router, routing::post};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/token/", post(handlers::auth::obtain_token))
        .route("/api/token/refresh/", post(handlers::auth::refresh_token))
}
