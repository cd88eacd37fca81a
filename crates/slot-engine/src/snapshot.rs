//! JSON snapshot of one restaurant's complete state.
//!
//! This is the interchange document between the admin panel, the `slots`
//! CLI and [`InMemoryStore`](crate::store::InMemoryStore).

use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::model::{Floor, Reservation, Section, Settings, SpecialOpeningHour, Table};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSnapshot {
    pub settings: Settings,
    #[serde(default)]
    pub floors: Vec<Floor>,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub special_hours: Vec<SpecialOpeningHour>,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
}

impl RestaurantSnapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SlotError::InvalidSnapshot(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SlotError::InvalidSnapshot(e.to_string()))
    }
}
