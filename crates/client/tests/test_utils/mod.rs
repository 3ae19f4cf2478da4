#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use serde_json::{Value, json};
use std::sync::Arc;
use timemesh_client::{api::ApiClient, session::SessionStore};
use timemesh_core::models::user::TokenPair;
use wiremock::MockServer;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

pub fn tokens(access: &str, refresh: &str) -> TokenPair {
    TokenPair {
        access: access.to_string(),
        refresh: refresh.to_string(),
    }
}

/// A client pointed at `server`, already holding the given tokens.
pub fn signed_in_client(server: &MockServer, access: &str, refresh: &str) -> Arc<ApiClient> {
    let session = Arc::new(SessionStore::in_memory());
    session.set_tokens(&tokens(access, refresh)).unwrap();
    Arc::new(ApiClient::new(server.uri(), session))
}

pub fn user_json(id: i64, username: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "email": format!("{}@example.com", username),
        "first_name": "",
        "last_name": "",
    })
}

pub fn group_json(id: i64, name: &str) -> Value {
    let stamp = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
    json!({
        "id": id,
        "name": name,
        "description": "",
        "owner": "alice",
        "owner_id": 1,
        "created_at": stamp,
        "updated_at": stamp,
        "members": [],
    })
}

pub fn invite_json(id: i64, group_id: i64, group_name: &str) -> Value {
    let stamp = Utc.with_ymd_and_hms(2025, 1, 2, 8, 30, 0).unwrap();
    json!({
        "id": id,
        "group_id": group_id,
        "group": { "id": group_id, "name": group_name },
        "invited_by": "alice",
        "invited_at": stamp,
    })
}

pub fn slot_json(id: i64, date: &str, start: &str, end: &str, title: &str, is_available: bool) -> Value {
    json!({
        "id": id,
        "user_id": 1,
        "date": date,
        "start_time": start,
        "end_time": end,
        "title": title,
        "is_available": is_available,
    })
}
