use chrono::NaiveDate;
use thiserror::Error;

use crate::models::ScheduleKind;

#[derive(Debug, Error)]
pub enum RewardsError {
    #[error("failed to find {currency} price for date {date}")]
    PriceNotFound { currency: String, date: NaiveDate },

    #[error("{currency} price series has more than one price for date {date}")]
    DuplicatePrice { currency: String, date: NaiveDate },

    #[error("unable to get {kind} for date {date}")]
    ScheduleLookup { kind: ScheduleKind, date: NaiveDate },

    #[error("{kind} value {value} effective {effective_date} exceeds the full validator share")]
    ScheduleValueOutOfRange {
        kind: ScheduleKind,
        effective_date: NaiveDate,
        value: num_bigint::BigUint,
    },

    #[error("rocket pool validator {validator_index} has no {kind} schedule")]
    MissingSchedule {
        validator_index: u64,
        kind: ScheduleKind,
    },

    #[error("conflicting aggregation options: {0}")]
    ConfigurationConflict(String),

    #[error("invalid configuration for {key}: {reason}")]
    Config { key: &'static str, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RewardsError>;
