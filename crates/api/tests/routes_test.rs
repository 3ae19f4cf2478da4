mod test_utils;

use axum::http::{HeaderName, HeaderValue, StatusCode, header::AUTHORIZATION};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use timemesh_api::routes::health::{HealthResponse, VersionResponse};
use timemesh_core::errors::{ErrorBody, ErrorCode};

use test_utils::test_server;

fn auth_header(value: &'static str) -> (HeaderName, HeaderValue) {
    (AUTHORIZATION, HeaderValue::from_static(value))
}

#[test_log::test(tokio::test)]
async fn test_health_check() {
    let server = test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<HealthResponse>().status, "ok");
}

#[tokio::test]
async fn test_version_reports_crate_version() {
    let server = test_server();

    let response = server.get("/version").await;

    assert_eq!(response.json::<VersionResponse>().version, env!("CARGO_PKG_VERSION"));
}

#[rstest]
#[case("/api/users/me/")]
#[case("/api/groups/")]
#[case("/api/groups/pending-invites/")]
#[case("/api/groups/12/")]
#[case("/api/groups/12/members/")]
#[case("/api/availability/slots/")]
#[case("/api/analytics/user-stats/")]
#[case("/api/analytics/group/12/invite-stats/")]
#[tokio::test]
async fn test_protected_get_routes_require_credentials(#[case] path: &str) {
    let server = test_server();

    let response = server.get(path).expect_failure().await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<ErrorBody>().code, Some(ErrorCode::Unauthorized));
}

#[rstest]
#[case("/api/groups/")]
#[case("/api/groups/3/invite/")]
#[case("/api/groups/3/accept/")]
#[case("/api/groups/remove-member/")]
#[case("/api/availability/slots/batch_create/")]
#[case("/api/availability/slots/batch_delete/")]
#[case("/api/availability/group/3/match/")]
#[case("/api/availability/match/")]
#[tokio::test]
async fn test_protected_post_routes_require_credentials(#[case] path: &str) {
    let server = test_server();

    let response = server.post(path).json(&json!({})).expect_failure().await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_bearer_scheme_is_rejected_as_invalid_token() {
    let server = test_server();
    let (name, value) = auth_header("Token abc123");

    let response = server
        .get("/api/users/me/")
        .add_header(name, value)
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<ErrorBody>().code, Some(ErrorCode::TokenInvalid));
}

#[tokio::test]
async fn test_delete_slot_requires_credentials() {
    let server = test_server();

    let response = server.delete("/api/availability/slots/41/").expect_failure().await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let server = test_server();

    let response = server.get("/api/calendars/").expect_failure().await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_wrong_method_is_rejected() {
    let server = test_server();

    let response = server.get("/api/token/").expect_failure().await;

    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
}
