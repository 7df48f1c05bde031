//! Serialized shape of a bill, as written by the bill entry forms.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sinkingfund_core::CoreError;
use sinkingfund_domain::{Bill, Frequency};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillRecord {
    pub bill_id: String,
    #[serde(default)]
    pub service: String,
    pub amount_due: Decimal,
    /// Inferred from `frequency` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurrences: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl BillRecord {
    pub fn into_bill(self) -> Result<Bill, CoreError> {
        let recurring = self.recurring.unwrap_or(self.frequency.is_some());
        let mut builder = Bill::builder(self.bill_id.clone(), self.amount_due)
            .service(self.service)
            .recurring(recurring);

        if !recurring {
            // The edit form files a one-off's date under `end_date`.
            if let Some(due) = self.due_date.or(self.start_date).or(self.end_date) {
                builder = builder.due_date(due);
            }
            return Ok(builder.build()?);
        }

        if let Some(start) = self.start_date {
            builder = builder.start_date(start);
        }
        let mut multiplier = 1;
        if let Some(raw) = self.frequency.as_deref() {
            let (frequency, steps) =
                parse_frequency(raw).ok_or_else(|| CoreError::UnknownFrequency {
                    bill_id: self.bill_id.clone(),
                    value: raw.to_string(),
                })?;
            builder = builder.frequency(frequency);
            multiplier = steps;
        }
        let interval = self
            .interval
            .unwrap_or(1)
            .checked_mul(multiplier)
            .ok_or_else(|| {
                CoreError::InvalidRecord(format!("bill `{}`: interval overflows", self.bill_id))
            })?;
        builder = builder.interval(interval);
        if let Some(count) = self.occurrences {
            builder = builder.occurrences(count);
        }
        if let Some(end) = self.end_date {
            builder = builder.end_date(end);
        }
        Ok(builder.build()?)
    }

    pub fn from_bill(bill: &Bill) -> Self {
        let mut record = BillRecord {
            bill_id: bill.bill_id().to_string(),
            service: bill.service().to_string(),
            amount_due: bill.amount_due(),
            recurring: Some(bill.is_recurring()),
            due_date: None,
            start_date: None,
            frequency: None,
            interval: None,
            occurrences: None,
            end_date: None,
        };
        match bill.frequency() {
            None => record.due_date = Some(bill.start_date()),
            Some(frequency) => {
                record.start_date = Some(bill.start_date());
                record.frequency = Some(frequency.as_str().to_string());
                record.interval = Some(bill.interval());
                record.occurrences = bill.occurrences();
                record.end_date = bill.end_date();
            }
        }
        record
    }
}

/// Maps a frequency name to its unit and step multiplier.
///
/// Accepts the canonical names plus `annual`/`annually` and `quarterly`.
pub fn parse_frequency(value: &str) -> Option<(Frequency, u32)> {
    match value.trim().to_ascii_lowercase().as_str() {
        "daily" => Some((Frequency::Daily, 1)),
        "weekly" => Some((Frequency::Weekly, 1)),
        "monthly" => Some((Frequency::Monthly, 1)),
        "quarterly" => Some((Frequency::Monthly, 3)),
        "yearly" | "annual" | "annually" => Some((Frequency::Yearly, 1)),
        _ => None,
    }
}
