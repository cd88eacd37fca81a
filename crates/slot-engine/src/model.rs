//! Entities read by the availability engine and persisted by the store.
//!
//! Wire names are camelCase so the admin panel's JSON deserializes directly.
//! Times of day travel as `"HH:MM"` strings, dates as `"YYYY-MM-DD"`.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Restaurant-wide booking settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Display name, not used in any computation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_name: Option<String>,
    /// How long a party is assumed to occupy a table.
    pub turnover_minutes: u32,
    /// Weekly default hours keyed by lowercase English weekday name
    /// (`"monday"` .. `"sunday"`). A `null` entry means closed that day.
    #[serde(default)]
    pub opening_hours: BTreeMap<String, Option<OpeningHours>>,
}

impl Settings {
    pub fn new(turnover_minutes: u32) -> Self {
        Self {
            restaurant_name: None,
            turnover_minutes,
            opening_hours: BTreeMap::new(),
        }
    }

    /// Set the default hours for one weekday, replacing any previous entry.
    pub fn with_hours(mut self, weekday: &str, open: NaiveTime, close: NaiveTime) -> Self {
        self.opening_hours
            .insert(weekday.to_string(), Some(OpeningHours::new(open, close)));
        self
    }

    /// Mark a weekday as closed by default.
    pub fn closed_on(mut self, weekday: &str) -> Self {
        self.opening_hours.insert(weekday.to_string(), None);
        self
    }
}

/// An open/close pair. Either side may be missing in stored data, in which
/// case the day is treated as closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OpeningHours {
    #[serde(default, with = "hhmm::option", skip_serializing_if = "Option::is_none")]
    pub open: Option<NaiveTime>,
    #[serde(default, with = "hhmm::option", skip_serializing_if = "Option::is_none")]
    pub close: Option<NaiveTime>,
}

impl OpeningHours {
    pub fn new(open: NaiveTime, close: NaiveTime) -> Self {
        Self {
            open: Some(open),
            close: Some(close),
        }
    }

    /// Both times, or `None` if either is missing.
    pub fn pair(&self) -> Option<(NaiveTime, NaiveTime)> {
        Some((self.open?, self.close?))
    }
}

/// Override of the weekly hours for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialOpeningHour {
    pub date: NaiveDate,
    pub is_open: bool,
    #[serde(default, with = "hhmm::option", skip_serializing_if = "Option::is_none")]
    pub open: Option<NaiveTime>,
    #[serde(default, with = "hhmm::option", skip_serializing_if = "Option::is_none")]
    pub close: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl SpecialOpeningHour {
    pub fn closed(date: NaiveDate) -> Self {
        Self {
            date,
            is_open: false,
            open: None,
            close: None,
            note: None,
        }
    }

    pub fn open(date: NaiveDate, open: NaiveTime, close: NaiveTime) -> Self {
        Self {
            date,
            is_open: true,
            open: Some(open),
            close: Some(close),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Housekeeping state of a table. Only `Ready` tables are ever offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    #[default]
    Ready,
    Cleaning,
    Maintenance,
    OutOfService,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: String,
    pub name: String,
    pub capacity: u32,
    #[serde(default)]
    pub status: TableStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
}

impl Table {
    pub fn new(id: impl Into<String>, capacity: u32) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            capacity,
            status: TableStatus::Ready,
            section_id: None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == TableStatus::Ready
    }

    /// Whether this table alone can seat `party_size`. Tables are never combined.
    pub fn seats(&self, party_size: u32) -> bool {
        self.capacity >= party_size
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Floor {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Seated,
    Completed,
    Cancelled,
    NoShow,
}

impl ReservationStatus {
    /// The wire name, e.g. `"no_show"`.
    pub fn as_str(self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Seated => "seated",
            ReservationStatus::Completed => "completed",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::NoShow => "no_show",
        }
    }

    /// Cancelled and no-show bookings release their table.
    pub fn occupies_table(self) -> bool {
        !matches!(self, ReservationStatus::Cancelled | ReservationStatus::NoShow)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub table_id: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub covers: u32,
    #[serde(default)]
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

/// A bookable start time and every eligible table free for its turnover window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub available_tables: Vec<Table>,
}

/// Serde adapter for `"HH:MM"` times.
///
/// `"HH:MM:SS"` is also accepted on input since SQL `time` columns render
/// that way; output is always `"HH:MM"`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn parse(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
        NaiveTime::parse_from_str(raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
    }

    pub fn format(time: NaiveTime) -> String {
        time.format(FORMAT).to_string()
    }

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(|e| de::Error::custom(format!("invalid time '{}': {}", raw, e)))
    }

    /// Optional variant. Empty strings from unfilled form fields read as `None`.
    pub mod option {
        use chrono::NaiveTime;
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            time: &Option<NaiveTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match time {
                Some(t) => serializer.serialize_str(&super::format(*t)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveTime>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                None => Ok(None),
                Some(raw) if raw.trim().is_empty() => Ok(None),
                Some(raw) => super::parse(&raw)
                    .map(Some)
                    .map_err(|e| de::Error::custom(format!("invalid time '{}': {}", raw, e))),
            }
        }
    }
}
