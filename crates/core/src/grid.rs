//! # Weekly Grid Geometry
//!
//! The calendar is a fixed grid of 7 day columns (Monday first) by 17 hour
//! rows starting at 06:00. This module maps grid cells to concrete slot
//! times and computes rectangular selections between two cells.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Timelike};

use crate::models::time_slot::SlotKey;

/// Number of day columns
pub const GRID_DAYS: u8 = 7;
/// Number of hour rows
pub const GRID_HOURS: u8 = 17;
/// Clock hour of the first row
pub const FIRST_HOUR: u8 = 6;

pub const WEEKDAY_NAMES: [&str; GRID_DAYS as usize] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// A single (day, hour-row) position in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub day: u8,
    pub hour: u8,
}

impl Cell {
    /// Returns `None` when the position falls outside the grid.
    pub fn new(day: u8, hour: u8) -> Option<Self> {
        (day < GRID_DAYS && hour < GRID_HOURS).then_some(Self { day, hour })
    }

    /// The cell for a weekday index and a clock hour (e.g. `9` for 09:00).
    pub fn at_clock(day: u8, clock_hour: u8) -> Option<Self> {
        clock_hour
            .checked_sub(FIRST_HOUR)
            .and_then(|hour| Self::new(day, hour))
    }

    pub fn clock_hour(&self) -> u8 {
        FIRST_HOUR + self.hour
    }

    pub fn start_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(u32::from(self.clock_hour()), 0, 0).unwrap_or(NaiveTime::MIN)
    }

    pub fn end_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(u32::from(self.clock_hour()) + 1, 0, 0).unwrap_or(NaiveTime::MIN)
    }

    pub fn weekday_name(&self) -> &'static str {
        WEEKDAY_NAMES[usize::from(self.day)]
    }
}

/// Inclusive rectangle of cells, normalised so that min <= max on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRect {
    pub min_day: u8,
    pub max_day: u8,
    pub min_hour: u8,
    pub max_hour: u8,
}

impl SelectionRect {
    /// The rectangle spanned by two corner cells, independent of drag direction.
    pub fn spanning(anchor: Cell, current: Cell) -> Self {
        Self {
            min_day: anchor.day.min(current.day),
            max_day: anchor.day.max(current.day),
            min_hour: anchor.hour.min(current.hour),
            max_hour: anchor.hour.max(current.hour),
        }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (self.min_day..=self.max_day).contains(&cell.day)
            && (self.min_hour..=self.max_hour).contains(&cell.hour)
    }

    pub fn len(&self) -> usize {
        usize::from(self.max_day - self.min_day + 1) * usize::from(self.max_hour - self.min_hour + 1)
    }

    /// Cells in day-major order.
    pub fn cells(&self) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(self.len());
        for day in self.min_day..=self.max_day {
            for hour in self.min_hour..=self.max_hour {
                cells.push(Cell { day, hour });
            }
        }
        cells
    }
}

/// One calendar week anchored on its Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridWeek {
    week_start: NaiveDate,
}

impl GridWeek {
    /// The week containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        let offset = i64::from(date.weekday().num_days_from_monday());
        Self {
            week_start: date - Duration::days(offset),
        }
    }

    pub fn week_start(&self) -> NaiveDate {
        self.week_start
    }

    pub fn week_end(&self) -> NaiveDate {
        self.week_start + Duration::days(i64::from(GRID_DAYS) - 1)
    }

    pub fn next(&self) -> Self {
        Self {
            week_start: self.week_start + Duration::days(7),
        }
    }

    pub fn previous(&self) -> Self {
        Self {
            week_start: self.week_start - Duration::days(7),
        }
    }

    pub fn date_of(&self, cell: Cell) -> NaiveDate {
        self.week_start + Duration::days(i64::from(cell.day))
    }

    pub fn key_of(&self, cell: Cell) -> SlotKey {
        SlotKey {
            date: self.date_of(cell),
            start_time: cell.start_time(),
        }
    }

    /// The grid cell a slot starting at `date`/`time` falls into, if visible.
    pub fn cell_at(&self, date: NaiveDate, time: NaiveTime) -> Option<Cell> {
        let day = (date - self.week_start).num_days();
        if !(0..i64::from(GRID_DAYS)).contains(&day) {
            return None;
        }
        let clock_hour = u8::try_from(time.hour()).ok()?;
        Cell::at_clock(day as u8, clock_hour)
    }
}
