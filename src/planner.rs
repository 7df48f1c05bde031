//! Wires configuration, bill storage, and schedule queries together.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

use sinkingfund_config::{Config, ConfigManager};
use sinkingfund_core::{BillBook, BillStorage, Clock, CoreError, ScheduleService};
use sinkingfund_domain::{Bill, BillInstance};
use sinkingfund_storage_json::JsonBillStorage;

use crate::SinkingFundError;

/// A bill book bound to its configuration and storage backend.
pub struct Planner<S: BillStorage = JsonBillStorage> {
    config: Config,
    storage: S,
    book: BillBook,
}

impl Planner<JsonBillStorage> {
    /// Loads the config through `manager`, then the bills it points at.
    pub fn open(manager: &ConfigManager) -> Result<Self, SinkingFundError> {
        let config = manager.load()?;
        Ok(Self::load(config, JsonBillStorage::new())?)
    }
}

impl<S: BillStorage> Planner<S> {
    pub fn new(config: Config, storage: S) -> Self {
        Self {
            config,
            storage,
            book: BillBook::new(),
        }
    }

    /// Reads the configured bills file; a missing file means no bills yet.
    pub fn load(config: Config, storage: S) -> Result<Self, CoreError> {
        let mut planner = Self::new(config, storage);
        let path = planner.config.resolve_bills_path();
        if !path.exists() {
            info!(path = %path.display(), "no bills file yet, starting empty");
            return Ok(planner);
        }
        let bills = planner.storage.load_bills(&path)?;
        planner.book.extend(bills)?;
        Ok(planner)
    }

    pub fn save(&self) -> Result<(), CoreError> {
        let bills: Vec<Bill> = self.book.bills().into_iter().cloned().collect();
        self.storage.save_bills(&self.config.resolve_bills_path(), &bills)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn book(&self) -> &BillBook {
        &self.book
    }

    pub fn add_bill(&mut self, bill: Bill) -> Result<(), CoreError> {
        self.book.add(bill)
    }

    pub fn remove_bill(&mut self, bill_id: &str) -> Result<Bill, CoreError> {
        self.book.remove(bill_id)
    }

    /// Replaces the stored bill with the same id; the id itself never changes.
    pub fn update_bill(&mut self, bill: Bill) -> Result<Bill, CoreError> {
        self.book.replace(bill)
    }

    pub fn remove_bills(&mut self, bill_ids: &[&str]) -> Result<Vec<Bill>, CoreError> {
        self.book.remove_many(bill_ids)
    }

    /// Everything due from today through the configured horizon.
    pub fn upcoming(&self, clock: &dyn Clock) -> Result<Vec<BillInstance>, CoreError> {
        ScheduleService::upcoming(self.book.bills(), clock, self.config.horizon_days)
    }

    pub fn window(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<BillInstance>, CoreError> {
        ScheduleService::instances_in_window(self.book.bills(), start, end)
    }

    pub fn total_due(&self, start: NaiveDate, end: NaiveDate) -> Result<Decimal, CoreError> {
        ScheduleService::total_due(self.book.bills(), start, end)
    }
}
