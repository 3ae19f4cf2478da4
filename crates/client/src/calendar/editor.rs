use chrono::NaiveTime;
use timemesh_core::{
    grid::{Cell, GridWeek},
    models::time_slot::{Recurrence, SlotInput, SlotKey, TimeSlot},
};

/// One selected cell prepared for editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotDraft {
    pub cell: Cell,
    pub key: SlotKey,
    pub end_time: NaiveTime,
    pub title: String,
    pub is_available: bool,
    /// Id of the stored slot this draft starts from, if any.
    pub existing_id: Option<i64>,
}

/// Builds a draft per cell, taking title and availability from a stored slot at the same key.
pub fn drafts_for(week: &GridWeek, cells: &[Cell], known: &[TimeSlot]) -> Vec<SlotDraft> {
    cells
        .iter()
        .map(|&cell| {
            let key = week.key_of(cell);
            match known.iter().find(|slot| slot.key() == key) {
                Some(slot) => SlotDraft {
                    cell,
                    key,
                    end_time: slot.end_time,
                    title: slot.title.clone(),
                    is_available: slot.is_available,
                    existing_id: Some(slot.id),
                },
                None => SlotDraft {
                    cell,
                    key,
                    end_time: cell.end_time(),
                    title: String::new(),
                    is_available: true,
                    existing_id: None,
                },
            }
        })
        .collect()
}

/// The values a bulk edit applies to every draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotEdit {
    pub title: String,
    pub is_available: bool,
    pub recurrence: Option<Recurrence>,
}

impl SlotEdit {
    /// Starts from the first draft's values; an empty selection starts available.
    pub fn seeded_from(drafts: &[SlotDraft]) -> Self {
        match drafts.first() {
            Some(first) => Self {
                title: first.title.clone(),
                is_available: first.is_available,
                recurrence: None,
            },
            None => Self {
                is_available: true,
                ..Self::default()
            },
        }
    }

    /// One input per draft. Busy slots lose their titles.
    pub fn to_inputs(&self, drafts: &[SlotDraft]) -> Vec<SlotInput> {
        let title = if self.is_available {
            self.title.trim().to_string()
        } else {
            String::new()
        };

        drafts
            .iter()
            .map(|draft| SlotInput {
                date: draft.key.date,
                start_time: draft.key.start_time,
                end_time: draft.end_time,
                title: title.clone(),
                is_available: self.is_available,
                recurrence: self.recurrence.clone(),
            })
            .collect()
    }
}
