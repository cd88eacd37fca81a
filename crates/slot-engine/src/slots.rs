//! Slot enumeration and availability computation.
//!
//! Candidate start times run from opening time in fixed 15-minute steps while
//! the start is strictly before closing time. A candidate becomes a [`Slot`]
//! when at least one eligible table has no reservation overlapping the
//! candidate's turnover window.
//!
//! The turnover window of a late slot is allowed to run past closing time:
//! only the start has to fall inside the service hours.

use chrono::{Duration, NaiveDate, NaiveTime};
use tracing::debug;

use crate::hours::resolve_opening_hours;
use crate::model::{Reservation, Settings, Slot, SpecialOpeningHour, Table};
use crate::overlap::{table_is_free, OccupancyWindow};

/// Granularity of candidate start times.
pub const SLOT_INTERVAL_MINUTES: i64 = 15;

/// Candidate start times in `[open, close)` at [`SLOT_INTERVAL_MINUTES`] steps.
///
/// Returns nothing when `close <= open`. Enumeration stops at midnight rather
/// than wrapping around.
pub fn slot_starts(open: NaiveTime, close: NaiveTime) -> Vec<NaiveTime> {
    let step = Duration::minutes(SLOT_INTERVAL_MINUTES);
    let mut starts = Vec::new();
    let mut cursor = open;

    while cursor < close {
        starts.push(cursor);
        let (next, wrapped_secs) = cursor.overflowing_add_signed(step);
        if wrapped_secs != 0 {
            break;
        }
        cursor = next;
    }

    starts
}

/// Tables that can seat `party_size` on their own and are ready for service,
/// in inventory order.
pub fn eligible_tables(tables: &[Table], party_size: u32) -> Vec<&Table> {
    tables
        .iter()
        .filter(|t| t.seats(party_size) && t.is_ready())
        .collect()
}

/// Compute the bookable slots for a party on `date`.
///
/// `reservations` must already be restricted to `date`; their start times
/// are anchored on `date` and their status is not inspected. Closed days, a
/// party no single ready table can seat, and fully booked services all yield
/// an empty vector.
///
/// Each slot lists its free tables in the same relative order as `tables`.
pub fn compute_available_slots(
    date: NaiveDate,
    party_size: u32,
    settings: &Settings,
    reservations: &[Reservation],
    tables: &[Table],
    special_hours: &[SpecialOpeningHour],
) -> Vec<Slot> {
    let Some((open, close)) = resolve_opening_hours(date, settings, special_hours) else {
        return Vec::new();
    };

    let eligible = eligible_tables(tables, party_size);
    if eligible.is_empty() {
        debug!(%date, party_size, "no ready table seats this party");
        return Vec::new();
    }

    let turnover = settings.turnover_minutes;
    let slots: Vec<Slot> = slot_starts(open, close)
        .into_iter()
        .filter_map(|time| {
            let window = OccupancyWindow::starting_at(date, time, turnover);
            let available_tables: Vec<Table> = eligible
                .iter()
                .filter(|table| table_is_free(table, date, &window, reservations, turnover))
                .map(|table| (*table).clone())
                .collect();

            if available_tables.is_empty() {
                None
            } else {
                Some(Slot {
                    time,
                    available_tables,
                })
            }
        })
        .collect();

    debug!(
        %date,
        party_size,
        eligible = eligible.len(),
        slots = slots.len(),
        "computed availability"
    );
    slots
}
