mod test_utils;

use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use timemesh_client::{
    errors::InviteFailure,
    invites::InvitesContext,
    poller::PollTask,
    teams::TeamsContext,
};
use timemesh_core::models::group::GroupRequest;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

use test_utils::{group_json, invite_json, signed_in_client};

async fn mount_groups(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/groups/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_refresh_reports_only_real_changes() {
    let server = MockServer::start().await;
    mount_groups(&server, json!([group_json(1, "Design"), group_json(2, "Ops")])).await;

    let teams = TeamsContext::new(signed_in_client(&server, "a1", "r1")).unwrap();
    let mut updates = teams.subscribe();

    assert!(teams.refresh().await.unwrap());
    assert!(updates.has_changed().unwrap());
    assert_eq!(updates.borrow_and_update().len(), 2);

    assert!(!teams.refresh().await.unwrap());
    assert!(!updates.has_changed().unwrap());
    assert_eq!(teams.teams().len(), 2);
    assert!(!teams.is_loading());
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_list() {
    let server = MockServer::start().await;
    mount_groups(&server, json!([group_json(1, "Design")])).await;

    let teams = TeamsContext::new(signed_in_client(&server, "a1", "r1")).unwrap();
    teams.refresh().await.unwrap();

    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/api/groups/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "Internal server error",
            "code": "internal",
        })))
        .mount(&server)
        .await;

    assert!(teams.poll().await.is_err());
    assert_eq!(teams.teams()[0].name, "Design");
}

#[tokio::test]
async fn test_create_and_delete_team_update_local_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/groups/"))
        .and(body_json(json!({ "name": "Research", "description": "" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(group_json(9, "Research")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/groups/9/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let teams = TeamsContext::new(signed_in_client(&server, "a1", "r1")).unwrap();
    let request = GroupRequest {
        name: "Research".to_string(),
        description: String::new(),
    };

    let created = teams.create_team(&request).await.unwrap();
    assert_eq!(created.id, 9);
    assert!(!teams.add_team(created).unwrap());
    assert_eq!(teams.teams().len(), 1);

    teams.delete_team(9).await.unwrap();
    assert!(teams.teams().is_empty());
}

#[tokio::test]
async fn test_update_team_replaces_entry() {
    let server = MockServer::start().await;
    mount_groups(&server, json!([group_json(4, "Old name")])).await;
    Mock::given(method("PUT"))
        .and(path("/api/groups/4/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(group_json(4, "New name")))
        .expect(1)
        .mount(&server)
        .await;

    let teams = TeamsContext::new(signed_in_client(&server, "a1", "r1")).unwrap();
    teams.refresh().await.unwrap();

    let request = GroupRequest {
        name: "New name".to_string(),
        description: String::new(),
    };
    teams.update_team(4, &request).await.unwrap();

    assert_eq!(teams.teams()[0].name, "New name");
}

#[tokio::test]
async fn test_accepting_invite_removes_it_and_refreshes_teams() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/groups/pending-invites/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            invite_json(11, 5, "Design"),
            invite_json(12, 6, "Ops"),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/groups/5/accept/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "detail": "Invite accepted" })))
        .expect(1)
        .mount(&server)
        .await;
    mount_groups(&server, json!([group_json(5, "Design")])).await;

    let api = signed_in_client(&server, "a1", "r1");
    let teams = Arc::new(TeamsContext::new(api.clone()).unwrap());
    let invites = InvitesContext::new(api).unwrap().with_teams(teams.clone());

    assert!(invites.refresh().await.unwrap());
    let first = invites.pending()[0].clone();

    invites.accept(&first).await.unwrap();

    let remaining: Vec<i64> = invites.pending().iter().map(|i| i.id).collect();
    assert_eq!(remaining, vec![12]);
    assert_eq!(teams.teams()[0].id, 5);
}

#[tokio::test]
async fn test_failed_reject_keeps_invite() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/groups/pending-invites/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([invite_json(11, 5, "Design")])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/groups/5/reject/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "No pending invite for this group",
            "code": "no_pending_invite",
        })))
        .mount(&server)
        .await;

    let invites = InvitesContext::new(signed_in_client(&server, "a1", "r1")).unwrap();
    invites.refresh().await.unwrap();
    let invite = invites.pending()[0].clone();

    assert!(invites.reject(&invite).await.is_err());
    assert_eq!(invites.pending().len(), 1);
}

#[tokio::test]
async fn test_invite_user_classifies_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/groups/5/invite/"))
        .and(body_json(json!({ "username": "ghost" })))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "Resource not found: User ghost not found",
            "code": "user_not_found",
        })))
        .mount(&server)
        .await;

    let invites = InvitesContext::new(signed_in_client(&server, "a1", "r1")).unwrap();
    let failure = invites.invite_user(5, " ghost ").await.unwrap_err();

    assert_eq!(failure, InviteFailure::UserNotFound);
}

#[tokio::test]
async fn test_invite_to_missing_group_is_not_a_missing_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/groups/9/invite/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "Resource not found: Group 9 not found",
            "code": "not_found",
        })))
        .mount(&server)
        .await;

    let invites = InvitesContext::new(signed_in_client(&server, "a1", "r1")).unwrap();
    let failure = invites.invite_user(9, "bob").await.unwrap_err();

    assert_eq!(failure, InviteFailure::GroupNotFound);
    assert_eq!(failure.message(), "This group no longer exists.");
}
