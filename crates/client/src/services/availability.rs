use chrono::NaiveDate;
use timemesh_core::models::{
    availability::{CommonAvailabilitySlot, GroupMatchRequest, UsersMatchRequest},
    time_slot::{
        BatchCreateRequest, BatchCreateResponse, BatchDeleteRequest, BatchDeleteResponse, SlotInput, SlotKey,
        TimeSlot,
    },
};

use crate::{api::ApiClient, errors::ClientResult};

const SLOTS_PATH: &str = "/api/availability/slots/";

/// The caller's slots, optionally limited to an inclusive date range.
pub async fn list_slots(
    api: &ApiClient,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> ClientResult<Vec<TimeSlot>> {
    let mut query = Vec::new();
    if let Some(start) = start_date {
        query.push(("start_date", start.to_string()));
    }
    if let Some(end) = end_date {
        query.push(("end_date", end.to_string()));
    }
    api.get_with_query(SLOTS_PATH, &query).await
}

pub async fn create_slot(api: &ApiClient, slot: &SlotInput) -> ClientResult<TimeSlot> {
    api.post(SLOTS_PATH, slot).await
}

pub async fn delete_slot(api: &ApiClient, slot_id: i64) -> ClientResult<()> {
    api.delete(&format!("{}{}/", SLOTS_PATH, slot_id)).await
}

pub async fn batch_create(api: &ApiClient, slots: Vec<SlotInput>) -> ClientResult<BatchCreateResponse> {
    api.post("/api/availability/slots/batch_create/", &BatchCreateRequest { slots })
        .await
}

pub async fn batch_delete(api: &ApiClient, slots: Vec<SlotKey>) -> ClientResult<BatchDeleteResponse> {
    api.post("/api/availability/slots/batch_delete/", &BatchDeleteRequest { slots })
        .await
}

pub async fn group_common_availability(
    api: &ApiClient,
    group_id: i64,
    date: NaiveDate,
) -> ClientResult<Vec<CommonAvailabilitySlot>> {
    api.post(
        &format!("/api/availability/group/{}/match/", group_id),
        &GroupMatchRequest { date },
    )
    .await
}

pub async fn users_common_availability(
    api: &ApiClient,
    users: Vec<i64>,
    date: NaiveDate,
) -> ClientResult<Vec<CommonAvailabilitySlot>> {
    api.post("/api/availability/match/", &UsersMatchRequest { users, date })
        .await
}
