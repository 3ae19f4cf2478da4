use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;
use timemesh_core::{
    errors::{ErrorCode, TimeError, TimeResult},
    models::user::{RegisterRequest, RegisterResponse, RegisteredUser, User},
};
use timemesh_db::{
    models::{DbUser, NewUser},
    store::UserStore,
};

use crate::{
    ApiState,
    middleware::{
        auth::{self, AuthUser},
        error_handling::AppError,
    },
};

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_USERNAME_LENGTH: usize = 150;

/// Checks a registration payload before touching the database.
pub fn validate_registration(payload: &RegisterRequest) -> TimeResult<()> {
    let username = payload.username.trim();
    if username.is_empty() {
        return Err(TimeError::Validation("Username is required".to_string()));
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(TimeError::Validation(format!(
            "Username must be at most {} characters",
            MAX_USERNAME_LENGTH
        )));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(TimeError::Validation("Username must not contain spaces".to_string()));
    }

    let email = payload.email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => {}
        _ => return Err(TimeError::Validation("Enter a valid email address".to_string())),
    }

    if payload.password != payload.password2 {
        return Err(TimeError::conflict(
            ErrorCode::PasswordMismatch,
            "Password fields didn't match",
        ));
    }
    if payload.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(TimeError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    Ok(())
}

/// Picks the conflict error for an already used username and/or email.
pub fn account_conflict(username_taken: bool, email_taken: bool) -> Option<TimeError> {
    match (username_taken, email_taken) {
        (true, true) => Some(TimeError::conflict(
            ErrorCode::AccountTaken,
            "A user with that username and email already exists",
        )),
        (true, false) => Some(TimeError::conflict(
            ErrorCode::UsernameTaken,
            "A user with that username already exists",
        )),
        (false, true) => Some(TimeError::conflict(
            ErrorCode::EmailTaken,
            "A user with that email already exists",
        )),
        (false, false) => None,
    }
}

/// Validates a registration and stores the account.
///
/// Uniqueness is checked up front for a precise error, and again when the
/// insert loses a race with a concurrent registration.
pub async fn register_account<S>(store: &S, payload: &RegisterRequest) -> TimeResult<DbUser>
where
    S: UserStore + ?Sized,
{
    validate_registration(payload)?;

    let username = payload.username.trim();
    let email = payload.email.trim();

    let username_taken = store.username_taken(username).await?;
    let email_taken = store.email_taken(email).await?;
    if let Some(conflict) = account_conflict(username_taken, email_taken) {
        return Err(conflict);
    }

    let account = NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password_hash: auth::hash_password(&payload.password)?,
        first_name: payload.first_name.trim().to_string(),
        last_name: payload.last_name.trim().to_string(),
    };

    match store.insert_user(&account).await? {
        Some(created) => Ok(created),
        None => {
            tracing::debug!("Registration of {} lost a uniqueness race", username);
            let username_taken = store.username_taken(username).await?;
            let email_taken = store.email_taken(email).await?;
            Err(account_conflict(username_taken, email_taken).unwrap_or_else(|| {
                TimeError::conflict(
                    ErrorCode::AccountTaken,
                    "A user with that username or email already exists",
                )
            }))
        }
    }
}

#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let created = register_account(&state.db_pool, &payload).await?;

    tracing::info!("Registered user {} ({})", created.username, created.id);

    let response = RegisterResponse {
        message: "User registered successfully".to_string(),
        user: RegisteredUser {
            username: created.username,
            email: created.email,
            first_name: created.first_name,
            last_name: created.last_name,
        },
    };

    Ok((StatusCode::CREATED, Json(response)))
}

#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn me(AuthUser(db_user): AuthUser) -> Json<User> {
    Json(db_user.into())
}
