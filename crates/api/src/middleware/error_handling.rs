//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and the JSON error body shared by
//! every endpoint: `{"error": "<message>", "code": "<error_code>"}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use timemesh_core::errors::{ErrorBody, TimeError};

/// Application error wrapper that provides HTTP status code mapping
///
/// Handlers return `Result<_, AppError>` and use `?` on anything producing a
/// `TimeError` or an `eyre::Report`.
///
/// ```
/// use axum::Json;
/// use timemesh_api::middleware::error_handling::AppError;
/// use timemesh_core::errors::TimeError;
///
/// async fn handler(name: String) -> Result<Json<String>, AppError> {
///     if name.is_empty() {
///         return Err(TimeError::Validation("Name is required".to_string()).into());
///     }
///     Ok(Json(name))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub TimeError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            TimeError::NotFound(_) | TimeError::Missing { .. } => StatusCode::NOT_FOUND,
            TimeError::Validation(_) | TimeError::Conflict { .. } => StatusCode::BAD_REQUEST,
            TimeError::Authentication(_) | TimeError::Credentials { .. } => StatusCode::UNAUTHORIZED,
            TimeError::Authorization(_) => StatusCode::FORBIDDEN,
            TimeError::Database(_) | TimeError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Internal details stay in the logs
        let message = if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self.0);
            "Internal server error".to_string()
        } else {
            tracing::debug!("Request rejected with {}: {}", status, self.0);
            self.0.to_string()
        };

        let body = Json(ErrorBody {
            error: message,
            code: Some(self.0.code()),
        });

        (status, body).into_response()
    }
}

/// Allows `?` on functions returning `Result<T, TimeError>` inside handlers.
impl From<TimeError> for AppError {
    fn from(err: TimeError) -> Self {
        AppError(err)
    }
}

/// Repository failures surface as `TimeError::Database`.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(TimeError::Database(err))
    }
}

/// Maps a TimeError straight to an HTTP response
pub fn map_error(err: TimeError) -> Response {
    AppError(err).into_response()
}
