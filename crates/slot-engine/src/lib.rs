//! # slot-engine
//!
//! Deterministic table-slot availability for restaurant reservations.
//!
//! Given a restaurant's weekly opening hours, date-specific overrides, table
//! inventory, existing bookings and a turnover duration, the engine lists the
//! 15-minute start times a party can still be seated at, together with every
//! table that is free for the whole turnover window.
//!
//! ## Modules
//!
//! - [`model`] — Settings, tables, reservations, special hours and slots
//! - [`hours`] — Effective opening hours for a date (override, then weekday)
//! - [`overlap`] — Half-open occupancy windows and the "table is free" predicate
//! - [`slots`] — Slot enumeration and the availability computation itself
//! - [`store`] — In-memory reservation store with write-time conflict checks
//! - [`snapshot`] — JSON snapshot of a restaurant's full state
//! - [`error`] — Error types

pub mod error;
pub mod hours;
pub mod model;
pub mod overlap;
pub mod slots;
pub mod snapshot;
pub mod store;

pub use error::SlotError;
pub use hours::{day_schedule, resolve_opening_hours, weekday_name, DaySchedule, HoursSource};
pub use model::{
    Floor, OpeningHours, Reservation, ReservationStatus, Section, Settings, Slot,
    SpecialOpeningHour, Table, TableStatus,
};
pub use overlap::{table_is_free, windows_overlap, OccupancyWindow};
pub use slots::{compute_available_slots, eligible_tables, slot_starts, SLOT_INTERVAL_MINUTES};
pub use snapshot::RestaurantSnapshot;
pub use store::{DaySummary, InMemoryStore, NewReservation};
