//! In-memory reservation store.
//!
//! An explicit repository object owning a restaurant's tables, sections,
//! floors, settings, special hours and reservations. The availability engine
//! only advises; this store is the write-time authority that refuses a
//! reservation overlapping another active booking on the same table.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, SlotError};
use crate::model::{
    Floor, Reservation, ReservationStatus, Section, Settings, Slot, SpecialOpeningHour, Table,
};
use crate::overlap::OccupancyWindow;
use crate::slots::compute_available_slots;
use crate::snapshot::RestaurantSnapshot;

/// Booking request without an id; the store assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReservation {
    pub table_id: String,
    pub date: NaiveDate,
    #[serde(with = "crate::model::hhmm")]
    pub time: NaiveTime,
    pub covers: u32,
    pub guest_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: ReservationStatus,
}

/// Per-day totals for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub date: NaiveDate,
    /// All reservations on the date, whatever their status.
    pub reservations: usize,
    /// Covers of reservations that still hold a table.
    pub active_covers: u32,
    pub by_status: BTreeMap<ReservationStatus, usize>,
}

#[derive(Debug, Clone)]
pub struct InMemoryStore {
    settings: Settings,
    floors: Vec<Floor>,
    sections: Vec<Section>,
    tables: Vec<Table>,
    special_hours: BTreeMap<NaiveDate, SpecialOpeningHour>,
    reservations: BTreeMap<String, Reservation>,
    next_reservation_seq: u64,
}

impl InMemoryStore {
    pub fn new(settings: Settings) -> Result<Self> {
        check_settings(&settings)?;
        Ok(Self {
            settings,
            floors: Vec::new(),
            sections: Vec::new(),
            tables: Vec::new(),
            special_hours: BTreeMap::new(),
            reservations: BTreeMap::new(),
            next_reservation_seq: 0,
        })
    }

    /// Build a store from a snapshot, running every record through the same
    /// validation as live writes.
    pub fn from_snapshot(snapshot: RestaurantSnapshot) -> Result<Self> {
        let mut store = Self::new(snapshot.settings)?;
        for floor in snapshot.floors {
            store.insert_floor(floor)?;
        }
        for section in snapshot.sections {
            store.insert_section(section)?;
        }
        for table in snapshot.tables {
            store.insert_table(table)?;
        }
        for special in snapshot.special_hours {
            if store.special_hours.contains_key(&special.date) {
                return Err(SlotError::InvalidSnapshot(format!(
                    "more than one special-hours row for {}",
                    special.date
                )));
            }
            store.set_special_hours(special);
        }
        for reservation in snapshot.reservations {
            store.insert_reservation(reservation)?;
        }
        Ok(store)
    }

    pub fn snapshot(&self) -> RestaurantSnapshot {
        RestaurantSnapshot {
            settings: self.settings.clone(),
            floors: self.floors.clone(),
            sections: self.sections.clone(),
            tables: self.tables.clone(),
            special_hours: self.special_hours.values().cloned().collect(),
            reservations: self.reservations.values().cloned().collect(),
        }
    }

    // ── Settings ─────────────────────────────────────────────

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) -> Result<()> {
        check_settings(&settings)?;
        self.settings = settings;
        Ok(())
    }

    // ── Floors ───────────────────────────────────────────────

    pub fn list_floors(&self) -> &[Floor] {
        &self.floors
    }

    pub fn get_floor(&self, id: &str) -> Option<&Floor> {
        self.floors.iter().find(|f| f.id == id)
    }

    pub fn insert_floor(&mut self, floor: Floor) -> Result<()> {
        if self.get_floor(&floor.id).is_some() {
            return Err(already_exists("floor", &floor.id));
        }
        self.floors.push(floor);
        Ok(())
    }

    pub fn update_floor(&mut self, floor: Floor) -> Result<()> {
        let slot = self
            .floors
            .iter_mut()
            .find(|f| f.id == floor.id)
            .ok_or_else(|| not_found("floor", &floor.id))?;
        *slot = floor;
        Ok(())
    }

    /// Remove a floor; its sections become unassigned.
    pub fn remove_floor(&mut self, id: &str) -> Result<Floor> {
        let index = self
            .floors
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| not_found("floor", id))?;
        for section in self.sections.iter_mut() {
            if section.floor_id.as_deref() == Some(id) {
                section.floor_id = None;
            }
        }
        Ok(self.floors.remove(index))
    }

    // ── Sections ─────────────────────────────────────────────

    pub fn list_sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn get_section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn insert_section(&mut self, section: Section) -> Result<()> {
        if self.get_section(&section.id).is_some() {
            return Err(already_exists("section", &section.id));
        }
        self.check_floor_ref(&section)?;
        self.sections.push(section);
        Ok(())
    }

    pub fn update_section(&mut self, section: Section) -> Result<()> {
        self.check_floor_ref(&section)?;
        let slot = self
            .sections
            .iter_mut()
            .find(|s| s.id == section.id)
            .ok_or_else(|| not_found("section", &section.id))?;
        *slot = section;
        Ok(())
    }

    /// Remove a section; its tables become unassigned.
    pub fn remove_section(&mut self, id: &str) -> Result<Section> {
        let index = self
            .sections
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| not_found("section", id))?;
        for table in self.tables.iter_mut() {
            if table.section_id.as_deref() == Some(id) {
                table.section_id = None;
            }
        }
        Ok(self.sections.remove(index))
    }

    fn check_floor_ref(&self, section: &Section) -> Result<()> {
        match section.floor_id.as_deref() {
            Some(floor_id) if self.get_floor(floor_id).is_none() => {
                Err(not_found("floor", floor_id))
            }
            _ => Ok(()),
        }
    }

    // ── Tables ───────────────────────────────────────────────

    /// Tables in insertion order, which is the order slots list them in.
    pub fn list_tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn get_table(&self, id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn insert_table(&mut self, table: Table) -> Result<()> {
        if self.get_table(&table.id).is_some() {
            return Err(already_exists("table", &table.id));
        }
        self.check_table(&table)?;
        self.tables.push(table);
        Ok(())
    }

    /// Replace a table's record. A capacity below the covers of any booking
    /// still holding the table is refused.
    pub fn update_table(&mut self, table: Table) -> Result<()> {
        self.check_table(&table)?;
        if let Some(largest) = self
            .reservations
            .values()
            .filter(|r| r.table_id == table.id && r.status.occupies_table())
            .max_by_key(|r| r.covers)
        {
            if !table.seats(largest.covers) {
                warn!(table = %table.id, reservation = %largest.id, "capacity below booked party");
                return Err(SlotError::CapacityExceeded {
                    table_id: table.id.clone(),
                    covers: largest.covers,
                    capacity: table.capacity,
                });
            }
        }
        let slot = self
            .tables
            .iter_mut()
            .find(|t| t.id == table.id)
            .ok_or_else(|| not_found("table", &table.id))?;
        *slot = table;
        Ok(())
    }

    /// Remove a table. Refused while any reservation still occupies it.
    pub fn remove_table(&mut self, id: &str) -> Result<Table> {
        let index = self
            .tables
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| not_found("table", id))?;
        if self
            .reservations
            .values()
            .any(|r| r.table_id == id && r.status.occupies_table())
        {
            return Err(SlotError::TableInUse(id.to_string()));
        }
        Ok(self.tables.remove(index))
    }

    fn check_table(&self, table: &Table) -> Result<()> {
        if table.capacity == 0 {
            return Err(SlotError::InvalidCapacity(format!(
                "table {} must seat at least one guest",
                table.id
            )));
        }
        match table.section_id.as_deref() {
            Some(section_id) if self.get_section(section_id).is_none() => {
                Err(not_found("section", section_id))
            }
            _ => Ok(()),
        }
    }

    // ── Special hours ────────────────────────────────────────

    /// Insert or replace the override for `special.date`.
    pub fn set_special_hours(&mut self, special: SpecialOpeningHour) -> Option<SpecialOpeningHour> {
        self.special_hours.insert(special.date, special)
    }

    pub fn special_hours_for(&self, date: NaiveDate) -> Option<&SpecialOpeningHour> {
        self.special_hours.get(&date)
    }

    pub fn remove_special_hours(&mut self, date: NaiveDate) -> Option<SpecialOpeningHour> {
        self.special_hours.remove(&date)
    }

    /// All overrides ordered by date.
    pub fn list_special_hours(&self) -> Vec<SpecialOpeningHour> {
        self.special_hours.values().cloned().collect()
    }

    // ── Reservations ─────────────────────────────────────────

    pub fn get_reservation(&self, id: &str) -> Option<&Reservation> {
        self.reservations.get(id)
    }

    /// Create a reservation with a store-assigned id.
    pub fn create_reservation(&mut self, request: NewReservation) -> Result<Reservation> {
        let reservation = Reservation {
            id: self.next_reservation_id(),
            table_id: request.table_id,
            date: request.date,
            time: request.time,
            covers: request.covers,
            guest_name: request.guest_name,
            phone: request.phone,
            email: request.email,
            notes: request.notes,
            status: request.status,
        };
        self.insert_reservation(reservation.clone())?;
        Ok(reservation)
    }

    /// Insert a reservation that already carries its id.
    pub fn insert_reservation(&mut self, reservation: Reservation) -> Result<()> {
        if self.reservations.contains_key(&reservation.id) {
            return Err(already_exists("reservation", &reservation.id));
        }
        self.check_reservation(&reservation)?;
        info!(
            id = %reservation.id,
            table = %reservation.table_id,
            date = %reservation.date,
            time = %reservation.time,
            "reservation stored"
        );
        self.reservations
            .insert(reservation.id.clone(), reservation);
        Ok(())
    }

    /// Replace an existing reservation, re-running every write check with the
    /// old record excluded from the conflict scan.
    pub fn update_reservation(&mut self, reservation: Reservation) -> Result<()> {
        if !self.reservations.contains_key(&reservation.id) {
            return Err(not_found("reservation", &reservation.id));
        }
        self.check_reservation(&reservation)?;
        info!(id = %reservation.id, "reservation updated");
        self.reservations
            .insert(reservation.id.clone(), reservation);
        Ok(())
    }

    /// Change only the status. Reactivating a cancelled booking is checked
    /// for conflicts like any other write.
    pub fn set_reservation_status(&mut self, id: &str, status: ReservationStatus) -> Result<()> {
        let mut reservation = self
            .reservations
            .get(id)
            .cloned()
            .ok_or_else(|| not_found("reservation", id))?;
        reservation.status = status;
        self.update_reservation(reservation)
    }

    pub fn remove_reservation(&mut self, id: &str) -> Result<Reservation> {
        self.reservations
            .remove(id)
            .ok_or_else(|| not_found("reservation", id))
    }

    /// Every reservation on `date`, ordered by time then id.
    pub fn reservations_on(&self, date: NaiveDate) -> Vec<Reservation> {
        let mut found: Vec<Reservation> = self
            .reservations
            .values()
            .filter(|r| r.date == date)
            .cloned()
            .collect();
        found.sort_by(|a, b| (a.time, &a.id).cmp(&(b.time, &b.id)));
        found
    }

    /// Reservations on `date` whose status is one of `statuses`.
    pub fn reservations_on_with_status(
        &self,
        date: NaiveDate,
        statuses: &[ReservationStatus],
    ) -> Vec<Reservation> {
        self.reservations_on(date)
            .into_iter()
            .filter(|r| statuses.contains(&r.status))
            .collect()
    }

    /// Reservations on `date` that still hold their table.
    pub fn active_reservations_on(&self, date: NaiveDate) -> Vec<Reservation> {
        self.reservations_on(date)
            .into_iter()
            .filter(|r| r.status.occupies_table())
            .collect()
    }

    /// Run the availability engine over the store's current state.
    pub fn available_slots(&self, date: NaiveDate, party_size: u32) -> Vec<Slot> {
        let reservations = self.active_reservations_on(date);
        let special: Vec<SpecialOpeningHour> =
            self.special_hours_for(date).cloned().into_iter().collect();
        compute_available_slots(
            date,
            party_size,
            &self.settings,
            &reservations,
            &self.tables,
            &special,
        )
    }

    pub fn day_summary(&self, date: NaiveDate) -> DaySummary {
        let reservations = self.reservations_on(date);
        let mut by_status = BTreeMap::new();
        for r in &reservations {
            *by_status.entry(r.status).or_insert(0) += 1;
        }
        DaySummary {
            date,
            reservations: reservations.len(),
            active_covers: reservations
                .iter()
                .filter(|r| r.status.occupies_table())
                .map(|r| r.covers)
                .sum(),
            by_status,
        }
    }

    fn check_reservation(&self, candidate: &Reservation) -> Result<()> {
        let table = self
            .get_table(&candidate.table_id)
            .ok_or_else(|| not_found("table", &candidate.table_id))?;

        if candidate.covers == 0 {
            return Err(SlotError::InvalidCovers(format!(
                "reservation {} has no guests",
                candidate.id
            )));
        }
        if !table.seats(candidate.covers) {
            warn!(id = %candidate.id, table = %table.id, covers = candidate.covers, "party too large");
            return Err(SlotError::CapacityExceeded {
                table_id: table.id.clone(),
                covers: candidate.covers,
                capacity: table.capacity,
            });
        }
        if !candidate.status.occupies_table() {
            return Ok(());
        }

        let turnover = self.settings.turnover_minutes;
        let window = OccupancyWindow::starting_at(candidate.date, candidate.time, turnover);
        let clash = self.reservations.values().find(|existing| {
            existing.id != candidate.id
                && existing.table_id == candidate.table_id
                && existing.status.occupies_table()
                && OccupancyWindow::starting_at(existing.date, existing.time, turnover)
                    .overlaps(&window)
        });

        match clash {
            Some(existing) => {
                warn!(
                    id = %candidate.id,
                    table = %candidate.table_id,
                    existing = %existing.id,
                    "double booking refused"
                );
                Err(SlotError::Conflict {
                    table_id: candidate.table_id.clone(),
                    existing: existing.id.clone(),
                })
            }
            None => Ok(()),
        }
    }

    fn next_reservation_id(&mut self) -> String {
        loop {
            self.next_reservation_seq += 1;
            let id = format!("res-{:04}", self.next_reservation_seq);
            if !self.reservations.contains_key(&id) {
                return id;
            }
        }
    }
}

fn check_settings(settings: &Settings) -> Result<()> {
    if settings.turnover_minutes == 0 {
        return Err(SlotError::InvalidTurnover(
            "turnover must be at least one minute".to_string(),
        ));
    }
    Ok(())
}

fn not_found(kind: &'static str, id: &str) -> SlotError {
    SlotError::NotFound {
        kind,
        id: id.to_string(),
    }
}

fn already_exists(kind: &'static str, id: &str) -> SlotError {
    SlotError::AlreadyExists {
        kind,
        id: id.to_string(),
    }
}
