use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Machine-readable error codes carried in every API error body.
///
/// Clients branch on these instead of matching message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    UserNotFound,
    Validation,
    InvalidCredentials,
    TokenInvalid,
    Unauthorized,
    Forbidden,
    AlreadyInvited,
    NoPendingInvite,
    UsernameTaken,
    EmailTaken,
    AccountTaken,
    PasswordMismatch,
    Internal,
}

#[derive(Error, Debug)]
pub enum TimeError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// A missing resource with a code more specific than `not_found`.
    #[error("Resource not found: {message}")]
    Missing { code: ErrorCode, message: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    /// A request that is well-formed but conflicts with existing state.
    #[error("{message}")]
    Conflict { code: ErrorCode, message: String },

    /// Authentication failure with a specific code (bad credentials, stale token).
    #[error("Authentication error: {message}")]
    Credentials { code: ErrorCode, message: String },

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl TimeError {
    pub fn missing(code: ErrorCode, message: impl Into<String>) -> Self {
        TimeError::Missing {
            code,
            message: message.into(),
        }
    }

    pub fn conflict(code: ErrorCode, message: impl Into<String>) -> Self {
        TimeError::Conflict {
            code,
            message: message.into(),
        }
    }

    pub fn credentials(code: ErrorCode, message: impl Into<String>) -> Self {
        TimeError::Credentials {
            code,
            message: message.into(),
        }
    }

    /// The code reported to clients for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            TimeError::NotFound(_) => ErrorCode::NotFound,
            TimeError::Validation(_) => ErrorCode::Validation,
            TimeError::Authentication(_) => ErrorCode::Unauthorized,
            TimeError::Authorization(_) => ErrorCode::Forbidden,
            TimeError::Missing { code, .. }
            | TimeError::Conflict { code, .. }
            | TimeError::Credentials { code, .. } => *code,
            TimeError::Database(_) | TimeError::Internal(_) => ErrorCode::Internal,
        }
    }
}

/// JSON body of every non-2xx API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
}

pub type TimeResult<T> = Result<T, TimeError>;
