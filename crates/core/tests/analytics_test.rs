use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use timemesh_core::{
    analytics::{InviteOutcome, invite_stats, user_stats},
    models::{
        analytics::{GroupInviteStats, UserStats},
        time_slot::TimeSlot,
    },
};

fn slot(day: u32, start: (u32, u32), end: (u32, u32)) -> TimeSlot {
    TimeSlot {
        id: 1,
        user_id: 1,
        date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
        start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
        title: String::new(),
        is_available: true,
    }
}

fn invited_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
}

fn invite(accepted_after: Option<Duration>) -> InviteOutcome {
    InviteOutcome {
        accepted: accepted_after.is_some(),
        invited_at: invited_at(),
        accepted_at: accepted_after.map(|wait| invited_at() + wait),
    }
}

#[test]
fn test_user_stats_without_slots() {
    assert_eq!(user_stats(&[]), UserStats::default());
}

#[test]
fn test_user_stats_totals_and_modes() {
    // 2025-03-10 is a Monday, 2025-03-12 a Wednesday
    let slots = vec![
        slot(10, (9, 0), (10, 30)),
        slot(10, (9, 30), (10, 0)),
        slot(12, (14, 0), (15, 0)),
    ];

    let stats = user_stats(&slots);

    assert_eq!(stats.total_hours, 3.0);
    assert_eq!(stats.average_duration_minutes, 60.0);
    assert_eq!(stats.most_common_time, Some(9));
    assert_eq!(stats.most_common_weekday.as_deref(), Some("Monday"));
}

#[test]
fn test_user_stats_ties_pick_earliest() {
    // Sunday 16th at 15:00 and Tuesday 11th at 8:00, one slot each
    let slots = vec![slot(16, (15, 0), (16, 0)), slot(11, (8, 0), (9, 0))];

    let stats = user_stats(&slots);

    assert_eq!(stats.most_common_time, Some(8));
    assert_eq!(stats.most_common_weekday.as_deref(), Some("Tuesday"));
}

#[test]
fn test_invite_stats_without_invites() {
    assert_eq!(invite_stats(&[]), GroupInviteStats::default());
}

#[test]
fn test_invite_stats_rate_and_wait() {
    let invites = vec![
        invite(Some(Duration::hours(1))),
        invite(Some(Duration::hours(3))),
        invite(None),
        invite(None),
    ];

    let stats = invite_stats(&invites);

    assert_eq!(stats.total_invites, 4);
    assert_eq!(stats.accepted_invites, 2);
    assert_eq!(stats.acceptance_rate, 50.0);
    assert_eq!(stats.average_acceptance_seconds, 2 * 3600);
}

#[test]
fn test_invite_stats_skip_unknown_acceptance_times() {
    let mut legacy = invite(Some(Duration::hours(5)));
    legacy.accepted_at = None;

    let stats = invite_stats(&[legacy, invite(Some(Duration::minutes(10)))]);

    assert_eq!(stats.acceptance_rate, 100.0);
    assert_eq!(stats.average_acceptance_seconds, 600);
}
