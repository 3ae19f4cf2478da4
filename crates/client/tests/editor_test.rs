mod test_utils;

use pretty_assertions::assert_eq;
use timemesh_client::calendar::{SlotEdit, editor::drafts_for};
use timemesh_core::{
    grid::{Cell, GridWeek},
    models::time_slot::{Recurrence, RepeatType, TimeSlot},
};

use test_utils::{date, time};

fn week() -> GridWeek {
    GridWeek::containing(date(2025, 6, 11))
}

fn stored(id: i64, day: u32, hour: u32, title: &str, is_available: bool) -> TimeSlot {
    TimeSlot {
        id,
        user_id: 1,
        date: date(2025, 6, day),
        start_time: time(hour, 0),
        end_time: time(hour + 1, 0),
        title: title.to_string(),
        is_available,
    }
}

#[test]
fn test_drafts_pick_up_stored_slots() {
    let cells = [Cell::at_clock(0, 9).unwrap(), Cell::at_clock(0, 10).unwrap()];
    let known = [stored(7, 9, 10, "Standup", false)];

    let drafts = drafts_for(&week(), &cells, &known);

    assert_eq!(drafts.len(), 2);
    assert_eq!(drafts[0].existing_id, None);
    assert_eq!(drafts[0].key.date, date(2025, 6, 9));
    assert_eq!(drafts[0].end_time, time(10, 0));
    assert!(drafts[0].is_available);
    assert_eq!(drafts[1].existing_id, Some(7));
    assert_eq!(drafts[1].title, "Standup");
    assert!(!drafts[1].is_available);
}

#[test]
fn test_edit_is_seeded_from_first_draft() {
    let cells = [Cell::at_clock(2, 14).unwrap(), Cell::at_clock(2, 15).unwrap()];
    let known = [stored(3, 11, 14, "Focus", true)];
    let drafts = drafts_for(&week(), &cells, &known);

    let edit = SlotEdit::seeded_from(&drafts);

    assert_eq!(edit.title, "Focus");
    assert!(edit.is_available);
    assert_eq!(edit.recurrence, None);
}

#[test]
fn test_empty_selection_seeds_available() {
    let edit = SlotEdit::seeded_from(&[]);
    assert!(edit.is_available);
    assert_eq!(edit.title, "");
}

#[test]
fn test_inputs_apply_edit_to_every_draft() {
    let cells = [Cell::at_clock(0, 9).unwrap(), Cell::at_clock(1, 9).unwrap()];
    let drafts = drafts_for(&week(), &cells, &[]);
    let recurrence = Recurrence {
        repeat_type: RepeatType::Weekly,
        end_date: Some(date(2025, 7, 31)),
        weekdays: None,
    };
    let edit = SlotEdit {
        title: "  Office hours ".to_string(),
        is_available: true,
        recurrence: Some(recurrence.clone()),
    };

    let inputs = edit.to_inputs(&drafts);

    assert_eq!(inputs.len(), 2);
    assert!(inputs.iter().all(|i| i.title == "Office hours"));
    assert!(inputs.iter().all(|i| i.recurrence.as_ref() == Some(&recurrence)));
    assert_eq!(inputs[1].date, date(2025, 6, 10));
    assert_eq!(inputs[1].start_time, time(9, 0));
}

#[test]
fn test_busy_slots_drop_title() {
    let drafts = drafts_for(&week(), &[Cell::at_clock(4, 18).unwrap()], &[]);
    let edit = SlotEdit {
        title: "Gym".to_string(),
        is_available: false,
        recurrence: None,
    };

    let inputs = edit.to_inputs(&drafts);

    assert_eq!(inputs[0].title, "");
    assert!(!inputs[0].is_available);
}
