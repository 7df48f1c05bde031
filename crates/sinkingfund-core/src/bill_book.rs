//! In-memory collection of bills keyed by id.

use std::collections::{BTreeMap, HashSet};

use sinkingfund_domain::Bill;
use tracing::debug;

use crate::CoreError;

#[derive(Debug, Clone, Default)]
pub struct BillBook {
    bills: BTreeMap<String, Bill>,
}

impl BillBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bills.is_empty()
    }

    pub fn add(&mut self, bill: Bill) -> Result<(), CoreError> {
        if self.bills.contains_key(bill.bill_id()) {
            return Err(CoreError::DuplicateBill(bill.bill_id().to_string()));
        }
        debug!(bill_id = bill.bill_id(), "bill added");
        self.bills.insert(bill.bill_id().to_string(), bill);
        Ok(())
    }

    /// Adds every bill or none of them; returns how many were added.
    pub fn extend<I>(&mut self, bills: I) -> Result<usize, CoreError>
    where
        I: IntoIterator<Item = Bill>,
    {
        let incoming: Vec<Bill> = bills.into_iter().collect();
        let mut seen = HashSet::new();
        for bill in &incoming {
            if self.bills.contains_key(bill.bill_id()) || !seen.insert(bill.bill_id()) {
                return Err(CoreError::DuplicateBill(bill.bill_id().to_string()));
            }
        }
        let added = incoming.len();
        for bill in incoming {
            self.bills.insert(bill.bill_id().to_string(), bill);
        }
        debug!(added, total = self.bills.len(), "bills added");
        Ok(added)
    }

    pub fn remove(&mut self, bill_id: &str) -> Result<Bill, CoreError> {
        self.bills
            .remove(bill_id)
            .ok_or_else(|| CoreError::BillNotFound(bill_id.to_string()))
    }

    /// Swaps in an edited bill under its existing id and returns the previous version.
    pub fn replace(&mut self, bill: Bill) -> Result<Bill, CoreError> {
        let slot = self
            .bills
            .get_mut(bill.bill_id())
            .ok_or_else(|| CoreError::BillNotFound(bill.bill_id().to_string()))?;
        debug!(bill_id = bill.bill_id(), "bill replaced");
        Ok(std::mem::replace(slot, bill))
    }

    /// Removes every listed bill or none of them.
    pub fn remove_many(&mut self, bill_ids: &[&str]) -> Result<Vec<Bill>, CoreError> {
        if let Some(missing) = bill_ids.iter().find(|id| !self.bills.contains_key(**id)) {
            return Err(CoreError::BillNotFound(missing.to_string()));
        }
        let removed: Vec<Bill> = bill_ids
            .iter()
            .filter_map(|id| self.bills.remove(*id))
            .collect();
        debug!(removed = removed.len(), total = self.bills.len(), "bills removed");
        Ok(removed)
    }

    pub fn get(&self, bill_id: &str) -> Option<&Bill> {
        self.bills.get(bill_id)
    }

    pub fn require(&self, bill_id: &str) -> Result<&Bill, CoreError> {
        self.get(bill_id)
            .ok_or_else(|| CoreError::BillNotFound(bill_id.to_string()))
    }

    /// Bills in natural-key order (start date, then id).
    pub fn bills(&self) -> Vec<&Bill> {
        let mut bills: Vec<&Bill> = self.bills.values().collect();
        bills.sort();
        bills
    }
}

impl FromIterator<Bill> for BillBook {
    /// Later bills replace earlier ones with the same id.
    fn from_iter<I: IntoIterator<Item = Bill>>(iter: I) -> Self {
        let bills = iter
            .into_iter()
            .map(|bill| (bill.bill_id().to_string(), bill))
            .collect();
        Self { bills }
    }
}
