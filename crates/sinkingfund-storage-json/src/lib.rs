//! sinkingfund-storage-json
//!
//! JSON persistence for bill definitions.

pub mod record;

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use sinkingfund_core::{BillStorage, CoreError};
use sinkingfund_domain::Bill;
use tempfile::NamedTempFile;
use tracing::info;

pub use record::{parse_frequency, BillRecord};

/// Filesystem-backed JSON persistence for bills.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBillStorage;

impl JsonBillStorage {
    pub fn new() -> Self {
        Self
    }
}

impl BillStorage for JsonBillStorage {
    fn load_bills(&self, path: &Path) -> Result<Vec<Bill>, CoreError> {
        load_bills_from_path(path)
    }

    fn save_bills(&self, path: &Path, bills: &[Bill]) -> Result<(), CoreError> {
        save_bills_to_path(bills, path)
    }
}

/// Reads a JSON array of bill records and validates each one.
pub fn load_bills_from_path(path: &Path) -> Result<Vec<Bill>, CoreError> {
    let data = fs::read_to_string(path)?;
    let bills = parse_bills(&data).map_err(|err| annotate(err, path))?;
    info!(path = %path.display(), count = bills.len(), "bills loaded");
    Ok(bills)
}

pub fn parse_bills(data: &str) -> Result<Vec<Bill>, CoreError> {
    let records: Vec<BillRecord> =
        serde_json::from_str(data).map_err(|err| CoreError::Serde(err.to_string()))?;
    records.into_iter().map(BillRecord::into_bill).collect()
}

pub fn save_bills_to_path(bills: &[Bill], path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let records: Vec<BillRecord> = bills.iter().map(BillRecord::from_bill).collect();
    let json =
        serde_json::to_string_pretty(&records).map_err(|err| CoreError::Serde(err.to_string()))?;
    replace_file(path, json.as_bytes())?;
    info!(path = %path.display(), count = bills.len(), "bills saved");
    Ok(())
}

fn annotate(err: CoreError, path: &Path) -> CoreError {
    match err {
        CoreError::Serde(message) => CoreError::Serde(format!("{}: {}", path.display(), message)),
        other => other,
    }
}

/// Writes into a sibling temp file and renames it over `path`, so readers
/// never see a half-written bills file.
fn replace_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(contents)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|err| err.error)?;
    Ok(())
}
