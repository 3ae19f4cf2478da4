use chrono::NaiveDate;
use std::{collections::BTreeMap, sync::Arc, time::Instant};
use timemesh_core::{
    grid::{Cell, GridWeek, SelectionRect},
    models::time_slot::{BatchCreateResponse, BatchDeleteResponse, SlotError, SlotKey, TimeSlot},
};

use crate::{
    api::ApiClient,
    calendar::{
        editor::{SlotDraft, SlotEdit, drafts_for},
        gesture::{GestureOutcome, GestureTracker, Point},
    },
    errors::ClientResult,
    modal::{ModalGuard, ModalRegistry},
    services::availability,
};

/// Prefix of the modal ids registered by the slot editor
pub const SLOT_EDITOR_MODAL: &str = "slot-editor";

/// An open bulk editor. Closing it (dropping) deregisters its modal.
#[derive(Debug)]
pub struct EditorSession {
    drafts: Vec<SlotDraft>,
    pub edit: SlotEdit,
    guard: ModalGuard,
}

impl EditorSession {
    pub fn drafts(&self) -> &[SlotDraft] {
        &self.drafts
    }

    pub fn modal_id(&self) -> &str {
        self.guard.id()
    }
}

/// What a pointer release led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerResult {
    Ignored,
    EditorOpened,
    Deleted(BatchDeleteResponse),
}

/// The calendar page state: visible week, its slots, the gesture in progress
/// and the open editor.
///
/// Methods take `&mut self`, so one controller never runs two batch
/// operations at once.
#[derive(Debug)]
pub struct CalendarController {
    api: Arc<ApiClient>,
    modals: ModalRegistry,
    week: GridWeek,
    slots: Vec<TimeSlot>,
    gesture: GestureTracker,
    editor: Option<EditorSession>,
}

impl CalendarController {
    pub fn new(api: Arc<ApiClient>, modals: ModalRegistry, today: NaiveDate) -> Self {
        Self {
            api,
            modals,
            week: GridWeek::containing(today),
            slots: Vec::new(),
            gesture: GestureTracker::new(),
            editor: None,
        }
    }

    pub fn week(&self) -> GridWeek {
        self.week
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn slot_at(&self, cell: Cell) -> Option<&TimeSlot> {
        let key = self.week.key_of(cell);
        self.slots.iter().find(|slot| slot.key() == key)
    }

    pub fn selection(&self) -> Option<SelectionRect> {
        self.gesture.selection()
    }

    /// Fetches the visible week. On failure the slots already shown are kept.
    pub async fn load_week(&mut self) -> ClientResult<()> {
        let fetched = availability::list_slots(
            &self.api,
            Some(self.week.week_start()),
            Some(self.week.week_end()),
        )
        .await;

        match fetched {
            Ok(slots) => {
                tracing::debug!("Loaded {} slots for week of {}", slots.len(), self.week.week_start());
                self.slots = slots;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to load week of {}: {}", self.week.week_start(), e);
                Err(e)
            }
        }
    }

    pub async fn show_next_week(&mut self) -> ClientResult<()> {
        self.week = self.week.next();
        self.slots.clear();
        self.load_week().await
    }

    pub async fn show_previous_week(&mut self) -> ClientResult<()> {
        self.week = self.week.previous();
        self.slots.clear();
        self.load_week().await
    }

    /// Starts a gesture. Ignored while the editor is open.
    pub fn pointer_down(&mut self, cell: Option<Cell>, button_code: i16, at: Point) -> bool {
        if self.editor.is_some() {
            return false;
        }
        self.gesture.pointer_down(cell, button_code, at)
    }

    pub fn pointer_move(&mut self, cell: Option<Cell>, at: Point, now: Instant) -> bool {
        self.gesture.pointer_move(cell, at, now)
    }

    pub async fn pointer_up(&mut self, cell: Option<Cell>) -> ClientResult<PointerResult> {
        let outcome = self.gesture.pointer_up(cell);
        self.finish(outcome).await
    }

    pub async fn pointer_leave(&mut self) -> ClientResult<PointerResult> {
        let outcome = self.gesture.pointer_leave();
        self.finish(outcome).await
    }

    async fn finish(&mut self, outcome: Option<GestureOutcome>) -> ClientResult<PointerResult> {
        match outcome {
            None => Ok(PointerResult::Ignored),
            Some(GestureOutcome::OpenEditor { cells, delay }) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                self.open_editor(&cells);
                Ok(PointerResult::EditorOpened)
            }
            Some(GestureOutcome::Delete { cells }) => {
                let response = self.delete_cells(&cells).await?;
                Ok(PointerResult::Deleted(response))
            }
        }
    }

    /// Opens the bulk editor for `cells`, replacing any editor already open.
    pub fn open_editor(&mut self, cells: &[Cell]) {
        let drafts = drafts_for(&self.week, cells, &self.slots);
        let edit = SlotEdit::seeded_from(&drafts);
        let guard = self.modals.guard_scoped(SLOT_EDITOR_MODAL);

        self.editor = Some(EditorSession { drafts, edit, guard });
    }

    pub fn editor(&self) -> Option<&EditorSession> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut EditorSession> {
        self.editor.as_mut()
    }

    pub fn cancel_editor(&mut self) {
        self.editor = None;
    }

    /// Sends the edited drafts as one batch create, then reloads the week.
    ///
    /// Without an open editor nothing is sent.
    pub async fn confirm_editor(&mut self) -> ClientResult<BatchCreateResponse> {
        let Some(session) = self.editor.take() else {
            return Ok(BatchCreateResponse::default());
        };
        let inputs = session.edit.to_inputs(&session.drafts);
        drop(session);

        let result = availability::batch_create(&self.api, inputs).await;
        match &result {
            Ok(response) => log_slot_errors("save", &response.errors),
            Err(e) => tracing::warn!("Saving slots failed: {}", e),
        }

        self.reconcile().await;
        result
    }

    /// Sends one batch delete for `cells`, then reloads the week.
    pub async fn delete_cells(&mut self, cells: &[Cell]) -> ClientResult<BatchDeleteResponse> {
        let keys: Vec<SlotKey> = cells.iter().map(|&cell| self.week.key_of(cell)).collect();

        let result = availability::batch_delete(&self.api, keys).await;
        match &result {
            Ok(response) => log_slot_errors("delete", &response.errors),
            Err(e) => tracing::warn!("Deleting slots failed: {}", e),
        }

        self.reconcile().await;
        result
    }

    async fn reconcile(&mut self) {
        if let Err(e) = self.load_week().await {
            tracing::debug!("Week reload after batch operation failed: {}", e);
        }
    }
}

/// Logs per-slot failures once per distinct message.
fn log_slot_errors(action: &str, errors: &[SlotError]) {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for error in errors {
        *counts.entry(error.error.as_str()).or_default() += 1;
    }
    for (message, count) in counts {
        tracing::warn!("Could not {} {} slot(s): {}", action, count, message);
    }
}
