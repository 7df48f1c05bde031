use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Structural problems detected while building a [`crate::Bill`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("bill_id must not be empty")]
    EmptyId,
    #[error("bill `{bill_id}`: amount_due must be non-negative, got {amount}")]
    NegativeAmount { bill_id: String, amount: Decimal },
    #[error("bill `{bill_id}`: amount_due must not exceed two decimal places, got {amount}")]
    ExcessPrecision { bill_id: String, amount: Decimal },
    #[error("bill `{bill_id}`: missing required field `{field}`")]
    MissingField {
        bill_id: String,
        field: &'static str,
    },
    #[error("bill `{bill_id}`: interval must be at least 1, got {interval}")]
    InvalidInterval { bill_id: String, interval: u32 },
    #[error("bill `{bill_id}`: occurrences must be at least 1, got {occurrences}")]
    InvalidOccurrences { bill_id: String, occurrences: u32 },
    #[error(
        "bill `{bill_id}`: occurrences ({occurrences}) and end_date ({end_date}) are mutually exclusive"
    )]
    ConflictingEndBounds {
        bill_id: String,
        occurrences: u32,
        end_date: NaiveDate,
    },
    #[error("bill `{bill_id}`: end_date {end_date} is before start_date {start_date}")]
    EndBeforeStart {
        bill_id: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
}

/// Caller misuse of a range query.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("range start {start} is after range end {end}")]
    Inverted { start: NaiveDate, end: NaiveDate },
}
