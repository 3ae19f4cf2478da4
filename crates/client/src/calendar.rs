//! # Weekly Calendar
//!
//! Pointer interaction over the 7 × 17 availability grid. [`gesture`] turns
//! raw pointer events into a selection and a release outcome, [`editor`]
//! prepares the slot drafts a bulk edit works on, and [`controller`] ties
//! both to the server through batch create/delete followed by a reload of
//! the visible week.

pub mod controller;
pub mod editor;
pub mod gesture;

pub use controller::CalendarController;
pub use editor::{SlotDraft, SlotEdit};
pub use gesture::{GestureOutcome, GestureTracker, Point, PointerButton};
