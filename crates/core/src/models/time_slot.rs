use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// An availability slot owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default)]
    pub title: String,
    pub is_available: bool,
}

impl TimeSlot {
    pub fn key(&self) -> SlotKey {
        SlotKey {
            date: self.date,
            start_time: self.start_time,
        }
    }
}

/// Identity of a slot within one user's calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotKey {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatType {
    #[default]
    None,
    Daily,
    Weekly,
    SpecificDays,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurrence {
    pub repeat_type: RepeatType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Weekday indices, Monday = 0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekdays: Option<Vec<u8>>,
}

/// Client-supplied slot description for create and batch create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotInput {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_available")]
    pub is_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,
}

fn default_available() -> bool {
    true
}

impl SlotInput {
    pub fn key(&self) -> SlotKey {
        SlotKey {
            date: self.date,
            start_time: self.start_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotError {
    pub slot: SlotKey,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchCreateRequest {
    pub slots: Vec<SlotInput>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchCreateResponse {
    pub created: Vec<TimeSlot>,
    #[serde(default)]
    pub errors: Vec<SlotError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchDeleteRequest {
    pub slots: Vec<SlotKey>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchDeleteResponse {
    pub deleted: usize,
    #[serde(default)]
    pub errors: Vec<SlotError>,
}

/// Optional date window for listing slots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlotRange {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
