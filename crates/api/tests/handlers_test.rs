mod test_utils;

use fake::{
    Fake,
    faker::internet::en::{Password, SafeEmail, Username},
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use timemesh_api::handlers::{
    availability::collect_member_slots,
    groups::{check_removal, validate_group_request},
    users::{account_conflict, validate_registration},
};
use timemesh_core::{
    errors::{ErrorCode, TimeError},
    models::{group::GroupRequest, user::RegisterRequest},
};
use timemesh_db::models::DbMemberSlot;

use test_utils::time;

fn registration() -> RegisterRequest {
    RegisterRequest {
        username: "ana".to_string(),
        email: "ana@example.com".to_string(),
        password: "s3cret-pass".to_string(),
        password2: "s3cret-pass".to_string(),
        first_name: "Ana".to_string(),
        last_name: "Lima".to_string(),
    }
}

#[test]
fn test_valid_registration_passes() {
    assert!(validate_registration(&registration()).is_ok());
}

#[test]
fn test_generated_accounts_pass_validation() {
    for _ in 0..20 {
        let password: String = Password(8..32).fake();
        let payload = RegisterRequest {
            username: Username().fake(),
            email: SafeEmail().fake(),
            password: password.clone(),
            password2: password,
            ..registration()
        };

        assert!(validate_registration(&payload).is_ok(), "rejected {:?}", payload);
    }
}

#[test]
fn test_password_mismatch_has_its_own_code() {
    let mut payload = registration();
    payload.password2 = "something-else".to_string();

    let err = validate_registration(&payload).unwrap_err();

    assert_eq!(err.code(), ErrorCode::PasswordMismatch);
}

#[rstest]
#[case::blank_username("  ", "ana@example.com", "s3cret-pass")]
#[case::spaced_username("ana lima", "ana@example.com", "s3cret-pass")]
#[case::bad_email("ana", "ana.example.com", "s3cret-pass")]
#[case::email_without_domain_dot("ana", "ana@localhost", "s3cret-pass")]
#[case::short_password("ana", "ana@example.com", "short")]
fn test_invalid_registrations(#[case] username: &str, #[case] email: &str, #[case] password: &str) {
    let payload = RegisterRequest {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        password2: password.to_string(),
        ..registration()
    };

    let err = validate_registration(&payload).unwrap_err();

    assert_eq!(err.code(), ErrorCode::Validation);
}

#[rstest]
#[case(true, true, Some(ErrorCode::AccountTaken))]
#[case(true, false, Some(ErrorCode::UsernameTaken))]
#[case(false, true, Some(ErrorCode::EmailTaken))]
#[case(false, false, None)]
fn test_account_conflicts(#[case] username: bool, #[case] email: bool, #[case] expected: Option<ErrorCode>) {
    assert_eq!(account_conflict(username, email).map(|e| e.code()), expected);
}

#[test]
fn test_group_request_is_trimmed() {
    let (name, description) = validate_group_request(&GroupRequest {
        name: "  Design Team ".to_string(),
        description: " weekly sync ".to_string(),
    })
    .unwrap();

    assert_eq!(name, "Design Team");
    assert_eq!(description, "weekly sync");
}

#[test]
fn test_group_name_is_required() {
    let result = validate_group_request(&GroupRequest {
        name: "   ".to_string(),
        description: String::new(),
    });

    assert!(matches!(result, Err(TimeError::Validation(_))));
}

#[rstest]
#[case::owner_removes_member(1, 1, 2, true)]
#[case::member_leaves(1, 2, 2, true)]
#[case::member_removes_other(1, 2, 3, false)]
#[case::owner_cannot_be_removed(1, 1, 1, false)]
#[case::member_cannot_remove_owner(1, 2, 1, false)]
fn test_member_removal_rules(
    #[case] owner: i64,
    #[case] caller: i64,
    #[case] target: i64,
    #[case] allowed: bool,
) {
    assert_eq!(check_removal(owner, caller, target).is_ok(), allowed);
}

#[test]
fn test_collect_member_slots_keeps_members_without_slots() {
    let members = vec![(1, "ana".to_string()), (2, "bruno".to_string())];
    let rows = vec![DbMemberSlot {
        user_id: 1,
        username: "ana".to_string(),
        start_time: time(9, 0),
        end_time: time(11, 0),
        title: "Focus".to_string(),
        is_available: true,
    }];

    let collected = collect_member_slots(&members, rows);

    assert_eq!(collected.len(), 2);
    assert_eq!(collected[0].username, "ana");
    assert_eq!(collected[0].slots.len(), 1);
    assert_eq!(collected[1].username, "bruno");
    assert!(collected[1].slots.is_empty());
}
