use chrono::{NaiveDate, NaiveTime};
use pretty_assertions::assert_eq;
use timemesh_core::matching::{
    MemberAvailability, MemberSlot, common_availability, common_availability_with_quorum,
};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn slot(start: (u32, u32), end: (u32, u32), title: &str, is_available: bool) -> MemberSlot {
    MemberSlot {
        start_time: time(start.0, start.1),
        end_time: time(end.0, end.1),
        title: title.to_string(),
        is_available,
    }
}

fn member(username: &str, slots: Vec<MemberSlot>) -> MemberAvailability {
    MemberAvailability {
        username: username.to_string(),
        slots,
    }
}

#[test]
fn test_overlap_of_two_members() {
    let members = vec![
        member("alice", vec![slot((9, 0), (12, 0), "Free", true)]),
        member("bob", vec![slot((10, 0), (14, 0), "Open", true)]),
    ];

    let matches = common_availability(date(), &members);

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].start_time, time(10, 0));
    assert_eq!(matches[0].end_time, time(12, 0));
    assert_eq!(matches[0].users.len(), 2);
    assert_eq!(matches[0].users[0].title, "Free");
    assert_eq!(matches[0].users[1].title, "Open");
}

#[test]
fn test_adjacent_hourly_slots_merge() {
    let members = vec![
        member(
            "alice",
            vec![
                slot((9, 0), (10, 0), "", true),
                slot((10, 0), (11, 0), "", true),
            ],
        ),
        member("bob", vec![slot((9, 0), (11, 0), "", true)]),
    ];

    let matches = common_availability(date(), &members);

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].start_time, time(9, 0));
    assert_eq!(matches[0].end_time, time(11, 0));
}

#[test]
fn test_busy_slots_are_ignored() {
    let members = vec![
        member("alice", vec![slot((9, 0), (12, 0), "", true)]),
        member("bob", vec![slot((9, 0), (12, 0), "Dentist", false)]),
    ];

    assert!(common_availability(date(), &members).is_empty());
}

#[test]
fn test_disjoint_slots_have_no_match() {
    let members = vec![
        member("alice", vec![slot((9, 0), (10, 0), "", true)]),
        member("bob", vec![slot((11, 0), (12, 0), "", true)]),
    ];

    assert!(common_availability(date(), &members).is_empty());
}

#[test]
fn test_member_without_slots_blocks_full_match() {
    let members = vec![
        member("alice", vec![slot((9, 0), (10, 0), "", true)]),
        member("carol", vec![]),
    ];

    assert!(common_availability(date(), &members).is_empty());
}

#[test]
fn test_quorum_allows_partial_matches() {
    let members = vec![
        member("alice", vec![slot((9, 0), (12, 0), "", true)]),
        member("bob", vec![slot((10, 0), (11, 0), "", true)]),
        member("carol", vec![]),
    ];

    let matches = common_availability_with_quorum(date(), &members, 1);

    // 9-10 alice only, 10-11 alice+bob, 11-12 alice only
    assert_eq!(matches.len(), 3);
    assert_eq!(matches[1].users.len(), 2);
    assert_eq!(matches[2].users.len(), 1);
}

#[test]
fn test_empty_members_yield_nothing() {
    assert!(common_availability(date(), &[]).is_empty());
}
