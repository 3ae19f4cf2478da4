use std::error::Error;
use timemesh_core::errors::{ErrorBody, ErrorCode, TimeError, TimeResult};

#[test]
fn test_time_error_display() {
    let not_found = TimeError::NotFound("Group not found".to_string());
    let validation = TimeError::Validation("Invalid input".to_string());
    let authentication = TimeError::Authentication("Missing token".to_string());
    let authorization = TimeError::Authorization("Not the group owner".to_string());
    let conflict = TimeError::conflict(ErrorCode::AlreadyInvited, "User already invited");
    let database = TimeError::Database(eyre::eyre!("Database connection failed"));
    let internal = TimeError::Internal(Box::new(std::io::Error::other("Internal error")));

    assert_eq!(not_found.to_string(), "Resource not found: Group not found");
    assert_eq!(validation.to_string(), "Validation error: Invalid input");
    assert_eq!(authentication.to_string(), "Authentication error: Missing token");
    assert_eq!(authorization.to_string(), "Authorization error: Not the group owner");
    assert_eq!(conflict.to_string(), "User already invited");
    assert!(database.to_string().contains("Database error:"));
    assert!(internal.to_string().contains("Internal server error:"));
}

#[test]
fn test_error_codes() {
    assert_eq!(TimeError::NotFound(String::new()).code(), ErrorCode::NotFound);
    assert_eq!(TimeError::Validation(String::new()).code(), ErrorCode::Validation);
    assert_eq!(TimeError::Authentication(String::new()).code(), ErrorCode::Unauthorized);
    assert_eq!(TimeError::Authorization(String::new()).code(), ErrorCode::Forbidden);
    assert_eq!(
        TimeError::credentials(ErrorCode::InvalidCredentials, "bad password").code(),
        ErrorCode::InvalidCredentials
    );
    assert_eq!(
        TimeError::conflict(ErrorCode::EmailTaken, "taken").code(),
        ErrorCode::EmailTaken
    );
    assert_eq!(
        TimeError::missing(ErrorCode::UserNotFound, "User bob not found").code(),
        ErrorCode::UserNotFound
    );
    assert_eq!(TimeError::Database(eyre::eyre!("boom")).code(), ErrorCode::Internal);
}

#[test]
fn test_error_code_wire_format() {
    let json = serde_json::to_string(&ErrorCode::NoPendingInvite).unwrap();
    assert_eq!(json, "\"no_pending_invite\"");

    let body: ErrorBody = serde_json::from_str(r#"{"error": "nope", "code": "already_invited"}"#).unwrap();
    assert_eq!(body.code, Some(ErrorCode::AlreadyInvited));

    let legacy: ErrorBody = serde_json::from_str(r#"{"error": "nope"}"#).unwrap();
    assert_eq!(legacy.code, None);
}

#[test]
fn test_error_conversion() {
    let time_error = TimeError::Internal(Box::new(std::io::Error::other("IO error")));

    assert!(time_error.source().is_some());
}

#[test]
fn test_time_result() {
    let result: TimeResult<i32> = Ok(42);
    assert_eq!(result.unwrap(), 42);

    let result: TimeResult<i32> = Err(TimeError::NotFound("Not found".to_string()));
    assert!(result.is_err());
}

#[test]
fn test_from_trait_implementation() {
    let time_error: TimeError = eyre::eyre!("Database error").into();

    assert!(time_error.to_string().contains("Database error"));
}
