//! Bill definitions and their construction-time validation.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::{checked_advance, Frequency};
use crate::error::ValidationError;

/// Amounts are exact to the cent.
pub const MINOR_UNIT_SCALE: u32 = 2;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
/// Describes how a recurring bill stops producing occurrences.
pub enum RecurrenceEnd {
    #[default]
    Never,
    /// Inclusive upper bound on due dates.
    OnDate(NaiveDate),
    /// Total number of occurrences, counted from the start date.
    AfterOccurrences(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Recurrence rule of a validated bill.
pub struct Schedule {
    frequency: Frequency,
    interval: u32,
    end: RecurrenceEnd,
}

impl Schedule {
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn end(&self) -> RecurrenceEnd {
        self.end
    }

    pub fn label(&self) -> String {
        self.frequency.label(self.interval)
    }
}

/// An immutable, validated obligation.
///
/// Field order drives the derived ordering: bills sort by start date, then id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bill {
    start_date: NaiveDate,
    bill_id: String,
    service: String,
    amount_due: Decimal,
    schedule: Option<Schedule>,
}

impl Bill {
    pub fn builder(bill_id: impl Into<String>, amount_due: Decimal) -> BillBuilder {
        BillBuilder {
            bill_id: bill_id.into(),
            amount_due,
            ..BillBuilder::default()
        }
    }

    /// Starts a recurring bill with its required fields already set.
    pub fn recurring(
        bill_id: impl Into<String>,
        amount_due: Decimal,
        start_date: NaiveDate,
        frequency: Frequency,
    ) -> BillBuilder {
        Self::builder(bill_id, amount_due)
            .recurring(true)
            .start_date(start_date)
            .frequency(frequency)
    }

    pub fn one_off(
        bill_id: impl Into<String>,
        amount_due: Decimal,
        due_date: NaiveDate,
    ) -> Result<Bill, ValidationError> {
        Self::builder(bill_id, amount_due).due_date(due_date).build()
    }

    pub fn bill_id(&self) -> &str {
        &self.bill_id
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn amount_due(&self) -> Decimal {
        self.amount_due
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn schedule(&self) -> Option<&Schedule> {
        self.schedule.as_ref()
    }

    pub fn is_recurring(&self) -> bool {
        self.schedule.is_some()
    }

    pub fn frequency(&self) -> Option<Frequency> {
        self.schedule.map(|s| s.frequency)
    }

    pub fn interval(&self) -> u32 {
        self.schedule.map_or(1, |s| s.interval)
    }

    pub fn occurrences(&self) -> Option<u32> {
        match self.schedule?.end {
            RecurrenceEnd::AfterOccurrences(count) => Some(count),
            _ => None,
        }
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        match self.schedule?.end {
            RecurrenceEnd::OnDate(date) => Some(date),
            _ => None,
        }
    }

    /// Due date of the occurrence at `index`, ignoring end bounds.
    ///
    /// Always stepped from the original start date so month-end clamping
    /// never accumulates. `None` for a one-off bill past index 0 or when the
    /// date leaves the representable range.
    pub fn occurrence_date(&self, index: u64) -> Option<NaiveDate> {
        match self.schedule {
            None if index == 0 => Some(self.start_date),
            None => None,
            Some(schedule) => {
                let steps = index.checked_mul(u64::from(schedule.interval))?;
                checked_advance(self.start_date, schedule.frequency, steps)
            }
        }
    }

    /// Inclusive upper bound of the bill's own span, `None` when open-ended.
    pub fn last_due_date(&self) -> Option<NaiveDate> {
        let Some(schedule) = self.schedule else {
            return Some(self.start_date);
        };
        match schedule.end {
            RecurrenceEnd::Never => None,
            RecurrenceEnd::OnDate(date) => Some(date),
            RecurrenceEnd::AfterOccurrences(count) => {
                self.occurrence_date(u64::from(count.saturating_sub(1)))
            }
        }
    }
}

impl fmt::Display for Bill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.bill_id, self.amount_due)?;
        match &self.schedule {
            Some(schedule) => write!(f, " {} from {}", schedule.label(), self.start_date),
            None => write!(f, " due {}", self.start_date),
        }
    }
}

/// Collects bill fields and validates them in [`BillBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct BillBuilder {
    bill_id: String,
    service: String,
    amount_due: Decimal,
    recurring: bool,
    start_date: Option<NaiveDate>,
    frequency: Option<Frequency>,
    interval: Option<u32>,
    occurrences: Option<u32>,
    end_date: Option<NaiveDate>,
}

impl BillBuilder {
    pub fn service(mut self, service: impl Into<String>) -> Self {
        self.service = service.into();
        self
    }

    pub fn recurring(mut self, recurring: bool) -> Self {
        self.recurring = recurring;
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Due date of a one-off bill. Shares storage with the start date.
    pub fn due_date(self, date: NaiveDate) -> Self {
        self.start_date(date)
    }

    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    pub fn interval(mut self, interval: u32) -> Self {
        self.interval = Some(interval);
        self
    }

    pub fn occurrences(mut self, occurrences: u32) -> Self {
        self.occurrences = Some(occurrences);
        self
    }

    pub fn end_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    pub fn build(self) -> Result<Bill, ValidationError> {
        let bill_id = self.bill_id;
        if bill_id.trim().is_empty() {
            return Err(ValidationError::EmptyId);
        }
        if self.amount_due < Decimal::ZERO {
            return Err(ValidationError::NegativeAmount {
                bill_id,
                amount: self.amount_due,
            });
        }
        if self.amount_due.normalize().scale() > MINOR_UNIT_SCALE {
            return Err(ValidationError::ExcessPrecision {
                bill_id,
                amount: self.amount_due,
            });
        }

        if !self.recurring {
            let Some(start_date) = self.start_date else {
                return Err(ValidationError::MissingField {
                    bill_id,
                    field: "due_date",
                });
            };
            return Ok(Bill {
                start_date,
                bill_id,
                service: self.service,
                amount_due: self.amount_due,
                schedule: None,
            });
        }

        let Some(start_date) = self.start_date else {
            return Err(ValidationError::MissingField {
                bill_id,
                field: "start_date",
            });
        };
        let Some(frequency) = self.frequency else {
            return Err(ValidationError::MissingField {
                bill_id,
                field: "frequency",
            });
        };
        let interval = self.interval.unwrap_or(1);
        if interval < 1 {
            return Err(ValidationError::InvalidInterval { bill_id, interval });
        }
        let end = match (self.occurrences, self.end_date) {
            (Some(occurrences), Some(end_date)) => {
                return Err(ValidationError::ConflictingEndBounds {
                    bill_id,
                    occurrences,
                    end_date,
                })
            }
            (Some(0), None) => {
                return Err(ValidationError::InvalidOccurrences {
                    bill_id,
                    occurrences: 0,
                })
            }
            (Some(count), None) => RecurrenceEnd::AfterOccurrences(count),
            (None, Some(end_date)) if end_date < start_date => {
                return Err(ValidationError::EndBeforeStart {
                    bill_id,
                    start_date,
                    end_date,
                })
            }
            (None, Some(end_date)) => RecurrenceEnd::OnDate(end_date),
            (None, None) => RecurrenceEnd::Never,
        };

        Ok(Bill {
            start_date,
            bill_id,
            service: self.service,
            amount_due: self.amount_due,
            schedule: Some(Schedule {
                frequency,
                interval,
                end,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn one_off_discards_recurrence_fields() {
        let bill = Bill::builder("car-tax", Decimal::new(12000, 2))
            .due_date(ymd(2025, 6, 1))
            .frequency(Frequency::Monthly)
            .occurrences(3)
            .build()
            .expect("one-off bill");
        assert!(!bill.is_recurring());
        assert_eq!(bill.interval(), 1);
        assert_eq!(bill.occurrences(), None);
        assert_eq!(bill.last_due_date(), Some(ymd(2025, 6, 1)));
    }

    #[test]
    fn occurrence_dates_clamp_from_the_original_day() {
        let bill = Bill::recurring("rent", Decimal::new(150000, 2), ymd(2024, 1, 31), Frequency::Monthly)
            .build()
            .unwrap();
        assert_eq!(bill.occurrence_date(1), Some(ymd(2024, 2, 29)));
        assert_eq!(bill.occurrence_date(2), Some(ymd(2024, 3, 31)));
        assert_eq!(bill.occurrence_date(7), Some(ymd(2024, 8, 31)));
    }

    #[test]
    fn last_due_date_follows_the_occurrence_cap() {
        let bill = Bill::recurring("gym", Decimal::new(3000, 2), ymd(2024, 1, 15), Frequency::Weekly)
            .interval(2)
            .occurrences(3)
            .build()
            .unwrap();
        assert_eq!(bill.last_due_date(), Some(ymd(2024, 2, 12)));
    }

    #[test]
    fn bills_order_by_start_date_then_id() {
        let later = Bill::one_off("a", Decimal::ONE, ymd(2025, 2, 1)).unwrap();
        let earlier_b = Bill::one_off("b", Decimal::ONE, ymd(2025, 1, 1)).unwrap();
        let earlier_c = Bill::one_off("c", Decimal::ONE, ymd(2025, 1, 1)).unwrap();
        let mut bills = vec![later.clone(), earlier_c.clone(), earlier_b.clone()];
        bills.sort();
        assert_eq!(bills, vec![earlier_b, earlier_c, later]);
    }

    #[test]
    fn display_mentions_schedule() {
        let bill = Bill::recurring("water", Decimal::new(4550, 2), ymd(2025, 3, 1), Frequency::Monthly)
            .interval(3)
            .build()
            .unwrap();
        assert_eq!(bill.to_string(), "water 45.50 Every 3 Months from 2025-03-01");
    }
}
