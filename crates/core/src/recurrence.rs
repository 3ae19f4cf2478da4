//! Expansion of recurring slot inputs into concrete dated occurrences.

use chrono::{Datelike, Duration, NaiveDate};

use crate::{
    errors::{TimeError, TimeResult},
    models::time_slot::{Recurrence, RepeatType, SlotInput},
};

/// Upper bound on occurrences generated from a single input
pub const MAX_OCCURRENCES: usize = 366;

/// Span used when a repeating recurrence omits its end date
pub const DEFAULT_SPAN_DAYS: i64 = 30;

/// Lists the dates a recurrence starting on `start` produces, `start` included.
///
/// Specific-day recurrences only yield dates whose weekday (Monday = 0) is
/// listed, so `start` itself may be skipped.
pub fn occurrence_dates(start: NaiveDate, recurrence: &Recurrence) -> TimeResult<Vec<NaiveDate>> {
    if recurrence.repeat_type == RepeatType::None {
        return Ok(vec![start]);
    }

    let end = recurrence
        .end_date
        .unwrap_or(start + Duration::days(DEFAULT_SPAN_DAYS));
    if end < start {
        return Err(TimeError::Validation(
            "Recurrence end date must not be before the slot date".to_string(),
        ));
    }

    let step = match recurrence.repeat_type {
        RepeatType::Weekly => 7,
        _ => 1,
    };

    let weekdays = match recurrence.repeat_type {
        RepeatType::SpecificDays => {
            let days = recurrence.weekdays.clone().unwrap_or_default();
            if days.is_empty() {
                return Err(TimeError::Validation(
                    "Specific-day recurrence requires at least one weekday".to_string(),
                ));
            }
            if let Some(bad) = days.iter().find(|d| **d > 6) {
                return Err(TimeError::Validation(format!("Invalid weekday index {}", bad)));
            }
            Some(days)
        }
        _ => None,
    };

    let mut dates = Vec::new();
    let mut current = start;
    while current <= end {
        let included = match &weekdays {
            Some(days) => days.contains(&(current.weekday().num_days_from_monday() as u8)),
            None => true,
        };
        if included {
            if dates.len() == MAX_OCCURRENCES {
                return Err(TimeError::Validation(format!(
                    "Recurrence expands to more than {} occurrences",
                    MAX_OCCURRENCES
                )));
            }
            dates.push(current);
        }
        current += Duration::days(step);
    }

    Ok(dates)
}

/// Expands an input into one non-recurring input per occurrence.
pub fn expand(input: &SlotInput) -> TimeResult<Vec<SlotInput>> {
    let Some(recurrence) = &input.recurrence else {
        return Ok(vec![input.clone()]);
    };

    let dates = occurrence_dates(input.date, recurrence)?;
    Ok(dates
        .into_iter()
        .map(|date| SlotInput {
            date,
            recurrence: None,
            ..input.clone()
        })
        .collect())
}
