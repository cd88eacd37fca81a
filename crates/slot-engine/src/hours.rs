//! Effective opening hours for a single calendar date.
//!
//! Resolution is a two-tier precedence chain: a special-hours row for the
//! exact date is authoritative (open or closed); only when none exists is the
//! weekly default for the date's weekday consulted.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{Settings, SpecialOpeningHour};

/// Where a day's hours came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoursSource {
    /// A special-hours override for the exact date.
    Special,
    /// The weekly default for the weekday.
    Weekly,
    /// Neither an override nor a usable weekly entry exists.
    Unconfigured,
}

/// Resolved schedule for one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DaySchedule {
    Open {
        open: NaiveTime,
        close: NaiveTime,
        source: HoursSource,
        note: Option<String>,
    },
    Closed {
        source: HoursSource,
        note: Option<String>,
    },
}

impl DaySchedule {
    /// The open/close pair, or `None` when closed.
    pub fn hours(&self) -> Option<(NaiveTime, NaiveTime)> {
        match self {
            DaySchedule::Open { open, close, .. } => Some((*open, *close)),
            DaySchedule::Closed { .. } => None,
        }
    }

    pub fn source(&self) -> HoursSource {
        match self {
            DaySchedule::Open { source, .. } | DaySchedule::Closed { source, .. } => *source,
        }
    }
}

/// Lowercase English weekday name, the key format of [`Settings::opening_hours`].
pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Resolve the schedule for `date`, keeping track of where it came from.
///
/// A special row that is closed, or open but missing either time, closes the
/// day regardless of the weekday default. No check is made that open < close.
pub fn day_schedule(
    date: NaiveDate,
    settings: &Settings,
    special_hours: &[SpecialOpeningHour],
) -> DaySchedule {
    if let Some(special) = special_hours.iter().find(|s| s.date == date) {
        let note = special.note.clone();
        return match (special.is_open, special.open, special.close) {
            (true, Some(open), Some(close)) => DaySchedule::Open {
                open,
                close,
                source: HoursSource::Special,
                note,
            },
            _ => {
                debug!(%date, "closed by special hours");
                DaySchedule::Closed {
                    source: HoursSource::Special,
                    note,
                }
            }
        };
    }

    let weekday = weekday_name(date);
    match settings
        .opening_hours
        .get(weekday)
        .and_then(|entry| entry.as_ref())
        .and_then(|hours| hours.pair())
    {
        Some((open, close)) => DaySchedule::Open {
            open,
            close,
            source: HoursSource::Weekly,
            note: None,
        },
        None => {
            debug!(%date, weekday, "no weekly hours configured");
            DaySchedule::Closed {
                source: HoursSource::Unconfigured,
                note: None,
            }
        }
    }
}

/// Effective `(open, close)` for `date`, or `None` when the restaurant is closed.
pub fn resolve_opening_hours(
    date: NaiveDate,
    settings: &Settings,
    special_hours: &[SpecialOpeningHour],
) -> Option<(NaiveTime, NaiveTime)> {
    day_schedule(date, settings, special_hours).hours()
}
