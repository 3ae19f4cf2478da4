use pretty_assertions::assert_eq;
use rstest::rstest;
use timemesh_client::errors::{ClientError, InviteFailure, RegisterFailure};
use timemesh_core::errors::ErrorCode;

fn api(status: u16, code: Option<ErrorCode>, message: &str) -> ClientError {
    ClientError::Api {
        status,
        code,
        message: message.to_string(),
    }
}

#[rstest]
#[case::by_code_user_not_found(Some(ErrorCode::UserNotFound), "whatever", InviteFailure::UserNotFound)]
#[case::by_code_group_not_found(Some(ErrorCode::NotFound), "Group 5 not found", InviteFailure::GroupNotFound)]
#[case::by_code_invited(Some(ErrorCode::AlreadyInvited), "whatever", InviteFailure::AlreadyInvited)]
#[case::by_code_forbidden(Some(ErrorCode::Forbidden), "nope", InviteFailure::NotAllowed)]
#[case::by_text_not_found(None, "User bob not found", InviteFailure::UserNotFound)]
#[case::by_text_group_not_found(None, "Group 5 not found", InviteFailure::GroupNotFound)]
#[case::by_text_invited(None, "User already invited", InviteFailure::AlreadyInvited)]
#[case::by_text_member(None, "bob is already a member", InviteFailure::AlreadyInvited)]
fn test_invite_failure_classification(
    #[case] code: Option<ErrorCode>,
    #[case] message: &str,
    #[case] expected: InviteFailure,
) {
    assert_eq!(InviteFailure::classify(&api(400, code, message)), expected);
}

#[test]
fn test_unknown_invite_failure_keeps_message() {
    let failure = InviteFailure::classify(&api(500, None, "Internal server error"));

    assert_eq!(failure, InviteFailure::Other("Internal server error".to_string()));
    assert_eq!(failure.message(), "Could not send the invite. Please try again.");
}

#[test]
fn test_invite_failure_messages() {
    assert_eq!(
        InviteFailure::UserNotFound.message(),
        "User not found. Check the username and try again."
    );
    assert_eq!(InviteFailure::GroupNotFound.message(), "This group no longer exists.");
    assert_eq!(
        InviteFailure::AlreadyInvited.message(),
        "This user was already invited to this group."
    );
}

#[rstest]
#[case::mismatch_code(Some(ErrorCode::PasswordMismatch), "x", RegisterFailure::PasswordMismatch)]
#[case::username_code(Some(ErrorCode::UsernameTaken), "x", RegisterFailure::UsernameTaken)]
#[case::email_code(Some(ErrorCode::EmailTaken), "x", RegisterFailure::EmailTaken)]
#[case::both_code(Some(ErrorCode::AccountTaken), "x", RegisterFailure::AccountTaken)]
#[case::username_text(None, "A user with that username already exists.", RegisterFailure::UsernameTaken)]
#[case::email_text(None, "Email already registered", RegisterFailure::EmailTaken)]
#[case::both_text(None, "Username and email already in use", RegisterFailure::AccountTaken)]
#[case::mismatch_text(None, "Password fields didn't match.", RegisterFailure::PasswordMismatch)]
fn test_register_failure_classification(
    #[case] code: Option<ErrorCode>,
    #[case] message: &str,
    #[case] expected: RegisterFailure,
) {
    assert_eq!(RegisterFailure::classify(&api(400, code, message)), expected);
}

#[test]
fn test_register_validation_message_is_shown() {
    let failure = RegisterFailure::classify(&api(
        400,
        Some(ErrorCode::Validation),
        "Password must be at least 8 characters",
    ));

    assert_eq!(failure.message(), "Password must be at least 8 characters");
}

#[test]
fn test_register_failure_messages() {
    assert_eq!(RegisterFailure::PasswordMismatch.message(), "Passwords do not match.");
    assert_eq!(
        RegisterFailure::AccountTaken.message(),
        "This email and username are already in use."
    );
}

#[test]
fn test_non_api_errors_have_no_code() {
    assert_eq!(ClientError::SessionExpired.code(), None);
    assert_eq!(ClientError::NotAuthenticated.status(), None);
}
