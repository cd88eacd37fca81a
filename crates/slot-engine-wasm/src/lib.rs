//! WASM bindings for slot-engine.
//!
//! Exposes availability computation and opening-hours resolution to the
//! browser admin panel via `wasm-bindgen`. All complex types cross the
//! boundary as JSON strings using the same camelCase shapes as the snapshot
//! format.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use slot_engine::model::hhmm;
use slot_engine::{Reservation, Settings, SpecialOpeningHour, Table};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct OpeningHoursDto {
    open: String,
    close: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("Invalid date '{}': {}", s, e))
}

fn parse_json<T: DeserializeOwned>(what: &str, json: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

/// Plain-Rust core of [`compute_available_slots`], kept free of `JsValue`
/// so it also runs on native targets.
pub fn available_slots_json(
    date: &str,
    party_size: u32,
    settings_json: &str,
    reservations_json: &str,
    tables_json: &str,
    special_hours_json: &str,
) -> Result<String, String> {
    let date = parse_date(date)?;
    let settings: Settings = parse_json("settings", settings_json)?;
    let reservations: Vec<Reservation> = parse_json("reservations", reservations_json)?;
    let tables: Vec<Table> = parse_json("tables", tables_json)?;
    let special_hours: Vec<SpecialOpeningHour> = parse_json("special hours", special_hours_json)?;

    let slots = slot_engine::compute_available_slots(
        date,
        party_size,
        &settings,
        &reservations,
        &tables,
        &special_hours,
    );
    to_json(&slots)
}

/// Plain-Rust core of [`resolve_opening_hours`].
pub fn opening_hours_json(
    date: &str,
    settings_json: &str,
    special_hours_json: &str,
) -> Result<String, String> {
    let date = parse_date(date)?;
    let settings: Settings = parse_json("settings", settings_json)?;
    let special_hours: Vec<SpecialOpeningHour> = parse_json("special hours", special_hours_json)?;

    let hours = slot_engine::resolve_opening_hours(date, &settings, &special_hours).map(
        |(open, close)| OpeningHoursDto {
            open: hhmm::format(open),
            close: hhmm::format(close),
        },
    );
    to_json(&hours)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Compute bookable slots for a party on a date.
///
/// # Arguments
/// - `date` -- Calendar date, "YYYY-MM-DD"
/// - `party_size` -- Number of guests
/// - `settings_json` -- `{turnoverMinutes, openingHours}` object
/// - `reservations_json` -- Array of reservations already filtered to `date`
/// - `tables_json` -- Array of tables (full inventory)
/// - `special_hours_json` -- Array of special-hours rows (may be `[]`)
///
/// Returns a JSON array of `{time, availableTables}` objects.
#[wasm_bindgen(js_name = "computeAvailableSlots")]
pub fn compute_available_slots(
    date: &str,
    party_size: u32,
    settings_json: &str,
    reservations_json: &str,
    tables_json: &str,
    special_hours_json: &str,
) -> Result<String, JsValue> {
    available_slots_json(
        date,
        party_size,
        settings_json,
        reservations_json,
        tables_json,
        special_hours_json,
    )
    .map_err(|e| JsValue::from_str(&e))
}

/// Resolve the effective opening hours for a date.
///
/// Returns `{"open":"HH:MM","close":"HH:MM"}`, or `null` when closed.
#[wasm_bindgen(js_name = "resolveOpeningHours")]
pub fn resolve_opening_hours(
    date: &str,
    settings_json: &str,
    special_hours_json: &str,
) -> Result<String, JsValue> {
    opening_hours_json(date, settings_json, special_hours_json).map_err(|e| JsValue::from_str(&e))
}
