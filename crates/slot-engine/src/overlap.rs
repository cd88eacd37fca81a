//! Occupancy windows and table conflict checks.
//!
//! Every booking, existing or candidate, occupies its table for the same
//! turnover duration: `[start, start + turnover)`. Windows are half-open, so a
//! booking ending exactly when another begins is NOT a conflict.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::model::{Reservation, Table};

/// The span a party holds a table for, anchored on a calendar date so that
/// windows running past midnight still compare correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccupancyWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl OccupancyWindow {
    pub fn starting_at(date: NaiveDate, time: NaiveTime, turnover_minutes: u32) -> Self {
        Self::spanning(date.and_time(time), turnover_minutes)
    }

    pub fn spanning(start: NaiveDateTime, minutes: u32) -> Self {
        Self {
            start,
            end: start + Duration::minutes(i64::from(minutes)),
        }
    }

    /// Half-open interval overlap: `a.start < b.end && a.end > b.start`.
    pub fn overlaps(&self, other: &OccupancyWindow) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// Whether two occupancy windows given as (start, duration) pairs overlap.
pub fn windows_overlap(
    a_start: NaiveDateTime,
    a_minutes: u32,
    b_start: NaiveDateTime,
    b_minutes: u32,
) -> bool {
    OccupancyWindow::spanning(a_start, a_minutes)
        .overlaps(&OccupancyWindow::spanning(b_start, b_minutes))
}

/// Whether `table` has no reservation overlapping `window`.
///
/// Reservation times are anchored on `date`; callers pass only the bookings
/// for that date. Status is not consulted here.
pub fn table_is_free(
    table: &Table,
    date: NaiveDate,
    window: &OccupancyWindow,
    reservations: &[Reservation],
    turnover_minutes: u32,
) -> bool {
    reservations
        .iter()
        .filter(|r| r.table_id == table.id)
        .all(|r| !OccupancyWindow::starting_at(date, r.time, turnover_minutes).overlaps(window))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 16)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn touching_windows_do_not_overlap() {
        assert!(!windows_overlap(at(18, 0), 60, at(19, 0), 60));
        assert!(!windows_overlap(at(19, 0), 60, at(18, 0), 60));
    }

    #[test]
    fn contained_and_straddling_windows_overlap() {
        assert!(windows_overlap(at(18, 0), 60, at(18, 30), 60));
        assert!(windows_overlap(at(18, 0), 60, at(17, 45), 60));
        assert!(windows_overlap(at(18, 0), 120, at(18, 30), 15));
    }

    #[test]
    fn zero_turnover_never_conflicts() {
        assert!(!windows_overlap(at(18, 0), 0, at(18, 0), 0));
    }

    #[test]
    fn window_crossing_midnight_ends_next_day() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
        let late =
            OccupancyWindow::starting_at(date, NaiveTime::from_hms_opt(23, 30, 0).unwrap(), 90);
        assert_eq!(late.end, date.succ_opt().unwrap().and_hms_opt(1, 0, 0).unwrap());
        assert!(late.overlaps(&OccupancyWindow::spanning(at(23, 0), 60)));
    }
}
