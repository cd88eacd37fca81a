//! Error types for reservation store and snapshot operations.
//!
//! Availability computation never fails: a closed day, a party too large for
//! every table, or a fully booked service are all empty results.

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SlotError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("{kind} already exists: {id}")]
    AlreadyExists { kind: &'static str, id: String },

    #[error("Table {table_id} is already booked by reservation {existing}")]
    Conflict { table_id: String, existing: String },

    #[error("Party of {covers} exceeds capacity {capacity} of table {table_id}")]
    CapacityExceeded {
        table_id: String,
        covers: u32,
        capacity: u32,
    },

    #[error("Invalid covers: {0}")]
    InvalidCovers(String),

    #[error("Invalid capacity: {0}")]
    InvalidCapacity(String),

    #[error("Invalid turnover: {0}")]
    InvalidTurnover(String),

    #[error("Table {0} still has active reservations")]
    TableInUse(String),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
