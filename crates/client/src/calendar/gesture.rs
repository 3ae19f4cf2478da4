use std::time::{Duration, Instant};
use timemesh_core::grid::{Cell, SelectionRect};

/// Movement beyond this distance from the press point makes the gesture a drag
pub const DRAG_THRESHOLD_PX: f64 = 5.0;
/// Minimum spacing between accepted hover updates
pub const MOVE_DEBOUNCE: Duration = Duration::from_millis(16);
/// Delay before the editor opens after a drag
pub const DRAG_OPEN_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

impl PointerButton {
    /// Maps a DOM-style button code; anything but 0 and 2 is ignored.
    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            0 => Some(PointerButton::Primary),
            2 => Some(PointerButton::Secondary),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// What a finished gesture asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Primary release: edit these cells once `delay` has passed.
    OpenEditor { cells: Vec<Cell>, delay: Duration },
    /// Secondary release: delete these cells right away.
    Delete { cells: Vec<Cell> },
}

#[derive(Debug, Clone)]
struct ActiveGesture {
    button: PointerButton,
    anchor: Cell,
    current: Cell,
    pending: Option<Cell>,
    origin: Point,
    dragged: bool,
    last_accepted: Option<Instant>,
}

impl ActiveGesture {
    fn latest_cell(&self) -> Cell {
        self.pending.unwrap_or(self.current)
    }
}

/// Tracks one press-move-release sequence at a time.
#[derive(Debug, Default)]
pub struct GestureTracker {
    active: Option<ActiveGesture>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Whether the active gesture has moved past the drag threshold.
    pub fn is_dragging(&self) -> bool {
        self.active.as_ref().is_some_and(|g| g.dragged)
    }

    /// Starts a gesture on `cell`. Presses outside the grid or with other buttons are ignored.
    pub fn pointer_down(&mut self, cell: Option<Cell>, button_code: i16, at: Point) -> bool {
        let (Some(cell), Some(button)) = (cell, PointerButton::from_code(button_code)) else {
            return false;
        };

        self.active = Some(ActiveGesture {
            button,
            anchor: cell,
            current: cell,
            pending: None,
            origin: at,
            dragged: false,
            last_accepted: None,
        });
        true
    }

    /// Feeds a pointer move. Returns whether the visible selection changed.
    ///
    /// Drag distance is checked on every event; hover cells are taken at most
    /// once per [`MOVE_DEBOUNCE`], with the latest skipped cell kept for release.
    pub fn pointer_move(&mut self, cell: Option<Cell>, at: Point, now: Instant) -> bool {
        let Some(gesture) = self.active.as_mut() else {
            return false;
        };

        if !gesture.dragged && gesture.origin.distance_to(at) > DRAG_THRESHOLD_PX {
            gesture.dragged = true;
        }

        let Some(cell) = cell else {
            return false;
        };

        let due = gesture
            .last_accepted
            .is_none_or(|last| now.saturating_duration_since(last) >= MOVE_DEBOUNCE);
        if !due {
            gesture.pending = Some(cell);
            return false;
        }

        gesture.last_accepted = Some(now);
        gesture.pending = None;
        let changed = gesture.current != cell;
        gesture.current = cell;
        changed
    }

    /// Ends the gesture over `cell`, or over the last hovered cell when `None`.
    pub fn pointer_up(&mut self, cell: Option<Cell>) -> Option<GestureOutcome> {
        let gesture = self.active.take()?;
        let last = cell.unwrap_or_else(|| gesture.latest_cell());
        let cells = SelectionRect::spanning(gesture.anchor, last).cells();

        Some(match gesture.button {
            PointerButton::Primary => GestureOutcome::OpenEditor {
                cells,
                delay: if gesture.dragged {
                    DRAG_OPEN_DELAY
                } else {
                    Duration::ZERO
                },
            },
            PointerButton::Secondary => GestureOutcome::Delete { cells },
        })
    }

    /// Leaving the grid ends the gesture as a release over the last hovered cell.
    pub fn pointer_leave(&mut self) -> Option<GestureOutcome> {
        self.pointer_up(None)
    }

    /// The rectangle currently highlighted, if a gesture is active.
    pub fn selection(&self) -> Option<SelectionRect> {
        self.active
            .as_ref()
            .map(|g| SelectionRect::spanning(g.anchor, g.current))
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }
}
