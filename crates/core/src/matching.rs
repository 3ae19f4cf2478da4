//! # Common Availability Matching
//!
//! Finds the windows on a single date where a set of members are all
//! available at the same time.
//!
//! The algorithm works on slot boundaries:
//!
//! 1. Collect the start and end of every available slot across all members
//! 2. Sort and deduplicate them, producing elementary windows between adjacent boundaries
//! 3. For each window, find the members with an available slot covering it
//! 4. Keep windows where enough members are available
//! 5. Merge touching windows that have the same participants and titles
//!
//! Runs in O(B × S) where B is the number of boundaries and S the total
//! number of slots.

use chrono::{NaiveDate, NaiveTime};

use crate::models::availability::{AvailableUser, CommonAvailabilitySlot};

/// A single slot of one member, as far as matching is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSlot {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub title: String,
    pub is_available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberAvailability {
    pub username: String,
    pub slots: Vec<MemberSlot>,
}

/// Windows on `date` where every member in `members` is available.
pub fn common_availability(date: NaiveDate, members: &[MemberAvailability]) -> Vec<CommonAvailabilitySlot> {
    common_availability_with_quorum(date, members, members.len())
}

/// Windows on `date` where at least `quorum` members are available.
///
/// A quorum of zero is treated as one; a window nobody attends is never reported.
pub fn common_availability_with_quorum(
    date: NaiveDate,
    members: &[MemberAvailability],
    quorum: usize,
) -> Vec<CommonAvailabilitySlot> {
    let quorum = quorum.max(1);
    if members.len() < quorum {
        return Vec::new();
    }

    let mut boundaries: Vec<NaiveTime> = members
        .iter()
        .flat_map(|member| member.slots.iter())
        .filter(|slot| slot.is_available && slot.start_time < slot.end_time)
        .flat_map(|slot| [slot.start_time, slot.end_time])
        .collect();
    boundaries.sort();
    boundaries.dedup();

    if boundaries.len() < 2 {
        return Vec::new();
    }

    let mut matches: Vec<CommonAvailabilitySlot> = Vec::new();

    for window in boundaries.windows(2) {
        let (start, end) = (window[0], window[1]);

        let users: Vec<AvailableUser> = members
            .iter()
            .filter_map(|member| {
                member
                    .slots
                    .iter()
                    .find(|slot| slot.is_available && slot.start_time <= start && slot.end_time >= end)
                    .map(|slot| AvailableUser {
                        username: member.username.clone(),
                        title: slot.title.clone(),
                    })
            })
            .collect();

        if users.len() < quorum {
            continue;
        }

        match matches.last_mut() {
            Some(last) if last.end_time == start && last.users == users => {
                last.end_time = end;
            }
            _ => matches.push(CommonAvailabilitySlot {
                date,
                start_time: start,
                end_time: end,
                users,
            }),
        }
    }

    matches
}
