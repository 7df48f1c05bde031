use std::io;

use thiserror::Error;

use sinkingfund_domain::{RangeError, ValidationError};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("Invalid range: {0}")]
    Range(#[from] RangeError),
    #[error("Bill not found: {0}")]
    BillNotFound(String),
    #[error("Duplicate bill id: {0}")]
    DuplicateBill(String),
    #[error("Unknown frequency `{value}` for bill `{bill_id}`")]
    UnknownFrequency { bill_id: String, value: String },
    #[error("Invalid bill record: {0}")]
    InvalidRecord(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
}
