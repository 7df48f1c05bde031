use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One dated occurrence of a bill.
///
/// Orders by due date first, then by owning bill id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BillInstance {
    due_date: NaiveDate,
    bill_id: String,
    amount_due: Decimal,
}

impl BillInstance {
    pub fn new(bill_id: impl Into<String>, amount_due: Decimal, due_date: NaiveDate) -> Self {
        Self {
            due_date,
            bill_id: bill_id.into(),
            amount_due,
        }
    }

    pub fn bill_id(&self) -> &str {
        &self.bill_id
    }

    pub fn amount_due(&self) -> Decimal {
        self.amount_due
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }
}
