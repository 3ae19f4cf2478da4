//! # Availability Analytics
//!
//! Aggregates behind the statistics endpoints. Ties are broken towards the
//! earliest hour and the earliest weekday (Monday first) so results are
//! stable across runs.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};

use crate::models::{
    analytics::{GroupInviteStats, UserStats},
    time_slot::TimeSlot,
};

/// One invite as far as the acceptance statistics are concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteOutcome {
    pub accepted: bool,
    pub invited_at: DateTime<Utc>,
    /// Unknown for invites accepted before acceptance times were recorded.
    pub accepted_at: Option<DateTime<Utc>>,
}

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Most frequent key; the smallest key wins a tie.
fn most_common<K: Ord + Copy>(counts: &BTreeMap<K, u32>) -> Option<K> {
    let mut best: Option<(K, u32)> = None;
    for (&key, &count) in counts {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((key, count));
        }
    }
    best.map(|(key, _)| key)
}

pub fn user_stats(slots: &[TimeSlot]) -> UserStats {
    if slots.is_empty() {
        return UserStats::default();
    }

    let mut total_minutes = 0i64;
    let mut hours: BTreeMap<u32, u32> = BTreeMap::new();
    let mut weekdays: BTreeMap<u32, u32> = BTreeMap::new();

    for slot in slots {
        total_minutes += (slot.end_time - slot.start_time).num_minutes();
        *hours.entry(slot.start_time.hour()).or_default() += 1;
        *weekdays.entry(slot.date.weekday().num_days_from_monday()).or_default() += 1;
    }

    let most_common_weekday = most_common(&weekdays)
        .and_then(|index| WEEK.get(index as usize))
        .map(|day| weekday_name(*day).to_string());

    UserStats {
        total_hours: total_minutes as f64 / 60.0,
        average_duration_minutes: total_minutes as f64 / slots.len() as f64,
        most_common_time: most_common(&hours),
        most_common_weekday,
    }
}

pub fn invite_stats(invites: &[InviteOutcome]) -> GroupInviteStats {
    let total = invites.len() as u32;
    let accepted: Vec<&InviteOutcome> = invites.iter().filter(|invite| invite.accepted).collect();

    let waits: Vec<i64> = accepted
        .iter()
        .filter_map(|invite| invite.accepted_at.map(|at| (at - invite.invited_at).num_seconds()))
        .collect();
    let average_acceptance_seconds = if waits.is_empty() {
        0
    } else {
        waits.iter().sum::<i64>() / waits.len() as i64
    };

    let acceptance_rate = if total == 0 {
        0.0
    } else {
        accepted.len() as f64 / total as f64 * 100.0
    };

    GroupInviteStats {
        total_invites: total,
        accepted_invites: accepted.len() as u32,
        acceptance_rate,
        average_acceptance_seconds,
    }
}
