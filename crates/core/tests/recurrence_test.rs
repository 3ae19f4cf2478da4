use chrono::{Datelike, NaiveDate, NaiveTime};
use pretty_assertions::assert_eq;
use rstest::rstest;
use timemesh_core::{
    errors::TimeError,
    models::time_slot::{Recurrence, RepeatType, SlotInput},
    recurrence::{MAX_OCCURRENCES, expand, occurrence_dates},
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn recurrence(repeat_type: RepeatType, end_date: Option<NaiveDate>, weekdays: Option<Vec<u8>>) -> Recurrence {
    Recurrence {
        repeat_type,
        end_date,
        weekdays,
    }
}

#[test]
fn test_no_repeat_yields_start_only() {
    let dates = occurrence_dates(date(2025, 1, 6), &Recurrence::default()).unwrap();
    assert_eq!(dates, vec![date(2025, 1, 6)]);
}

#[rstest]
#[case(RepeatType::Daily, 7)]
#[case(RepeatType::Weekly, 1)]
fn test_repeat_until_end_date(#[case] repeat_type: RepeatType, #[case] expected: usize) {
    let dates = occurrence_dates(
        date(2025, 1, 6),
        &recurrence(repeat_type, Some(date(2025, 1, 12)), None),
    )
    .unwrap();

    assert_eq!(dates.len(), expected);
    assert_eq!(dates[0], date(2025, 1, 6));
}

#[test]
fn test_weekly_steps_seven_days() {
    let dates = occurrence_dates(
        date(2025, 1, 6),
        &recurrence(RepeatType::Weekly, Some(date(2025, 1, 27)), None),
    )
    .unwrap();

    assert_eq!(
        dates,
        vec![date(2025, 1, 6), date(2025, 1, 13), date(2025, 1, 20), date(2025, 1, 27)]
    );
}

#[test]
fn test_specific_days_filters_weekdays() {
    // Monday and Wednesday over two weeks
    let dates = occurrence_dates(
        date(2025, 1, 6),
        &recurrence(RepeatType::SpecificDays, Some(date(2025, 1, 19)), Some(vec![0, 2])),
    )
    .unwrap();

    assert_eq!(dates.len(), 4);
    assert!(dates.iter().all(|d| matches!(d.weekday().num_days_from_monday(), 0 | 2)));
}

#[test]
fn test_missing_end_date_defaults_to_thirty_days() {
    let dates = occurrence_dates(date(2025, 1, 1), &recurrence(RepeatType::Daily, None, None)).unwrap();
    assert_eq!(dates.len(), 31);
    assert_eq!(*dates.last().unwrap(), date(2025, 1, 31));
}

#[rstest]
#[case(recurrence(RepeatType::Daily, Some(date(2024, 12, 1)), None))]
#[case(recurrence(RepeatType::SpecificDays, Some(date(2025, 2, 1)), Some(vec![])))]
#[case(recurrence(RepeatType::SpecificDays, Some(date(2025, 2, 1)), Some(vec![7])))]
#[case(recurrence(RepeatType::Daily, Some(date(2027, 1, 1)), None))]
fn test_invalid_recurrences(#[case] invalid: Recurrence) {
    let result = occurrence_dates(date(2025, 1, 6), &invalid);
    assert!(matches!(result, Err(TimeError::Validation(_))));
}

#[test]
fn test_occurrence_cap_is_inclusive() {
    let start = date(2025, 1, 1);
    let end = start + chrono::Duration::days(MAX_OCCURRENCES as i64 - 1);
    let dates = occurrence_dates(start, &recurrence(RepeatType::Daily, Some(end), None)).unwrap();
    assert_eq!(dates.len(), MAX_OCCURRENCES);
}

#[test]
fn test_expand_copies_slot_fields() {
    let input = SlotInput {
        date: date(2025, 1, 6),
        start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        title: "Focus".to_string(),
        is_available: true,
        recurrence: Some(recurrence(RepeatType::Daily, Some(date(2025, 1, 8)), None)),
    };

    let expanded = expand(&input).unwrap();

    assert_eq!(expanded.len(), 3);
    assert!(expanded.iter().all(|slot| slot.recurrence.is_none() && slot.title == "Focus"));
    assert_eq!(expanded[2].date, date(2025, 1, 8));
}
