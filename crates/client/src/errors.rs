use thiserror::Error;
use timemesh_core::errors::ErrorCode;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A non-2xx response from the API.
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<ErrorCode>,
        message: String,
    },

    /// Token refresh failed; credentials were cleared and the user must sign in again.
    #[error("Session expired, please sign in again")]
    SessionExpired,

    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ClientError::Api { code, .. } => *code,
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Why inviting a user to a group failed, as shown to the inviter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InviteFailure {
    UserNotFound,
    GroupNotFound,
    AlreadyInvited,
    NotAllowed,
    Other(String),
}

impl InviteFailure {
    /// Classifies by error code, falling back to the message text for servers that send none.
    pub fn classify(err: &ClientError) -> Self {
        match err.code() {
            Some(ErrorCode::UserNotFound) => return InviteFailure::UserNotFound,
            Some(ErrorCode::NotFound) => return InviteFailure::GroupNotFound,
            Some(ErrorCode::AlreadyInvited) => return InviteFailure::AlreadyInvited,
            Some(ErrorCode::Forbidden) => return InviteFailure::NotAllowed,
            Some(_) => return InviteFailure::Other(err.to_string()),
            None => {}
        }

        let message = err.to_string().to_lowercase();
        if message.contains("group") && message.contains("not found") {
            InviteFailure::GroupNotFound
        } else if message.contains("not found") {
            InviteFailure::UserNotFound
        } else if message.contains("already invited") || message.contains("already a member") {
            InviteFailure::AlreadyInvited
        } else {
            InviteFailure::Other(err.to_string())
        }
    }

    pub fn message(&self) -> &str {
        match self {
            InviteFailure::UserNotFound => "User not found. Check the username and try again.",
            InviteFailure::GroupNotFound => "This group no longer exists.",
            InviteFailure::AlreadyInvited => "This user was already invited to this group.",
            InviteFailure::NotAllowed => "Only the group owner can invite members.",
            InviteFailure::Other(_) => "Could not send the invite. Please try again.",
        }
    }
}

/// Why registration failed, as shown on the sign-up form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterFailure {
    PasswordMismatch,
    UsernameTaken,
    EmailTaken,
    AccountTaken,
    Invalid(String),
    Other(String),
}

impl RegisterFailure {
    pub fn classify(err: &ClientError) -> Self {
        match err.code() {
            Some(ErrorCode::PasswordMismatch) => return RegisterFailure::PasswordMismatch,
            Some(ErrorCode::UsernameTaken) => return RegisterFailure::UsernameTaken,
            Some(ErrorCode::EmailTaken) => return RegisterFailure::EmailTaken,
            Some(ErrorCode::AccountTaken) => return RegisterFailure::AccountTaken,
            Some(ErrorCode::Validation) => return RegisterFailure::Invalid(err.to_string()),
            Some(_) => return RegisterFailure::Other(err.to_string()),
            None => {}
        }

        let message = err.to_string().to_lowercase();
        let username = message.contains("username");
        let email = message.contains("email");
        match (username, email) {
            (true, true) => RegisterFailure::AccountTaken,
            (true, false) => RegisterFailure::UsernameTaken,
            (false, true) => RegisterFailure::EmailTaken,
            (false, false) if message.contains("match") => RegisterFailure::PasswordMismatch,
            (false, false) => RegisterFailure::Other(err.to_string()),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            RegisterFailure::PasswordMismatch => "Passwords do not match.",
            RegisterFailure::UsernameTaken => "This username is already in use.",
            RegisterFailure::EmailTaken => "This email is already in use.",
            RegisterFailure::AccountTaken => "This email and username are already in use.",
            RegisterFailure::Invalid(message) => message,
            RegisterFailure::Other(_) => "Registration failed. Please try again.",
        }
    }
}
