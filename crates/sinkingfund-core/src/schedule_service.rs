//! Schedules spanning many bills.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use tracing::debug;

use sinkingfund_domain::{iter_instances_in_range, Bill, BillInstance, RangeError};

use crate::{time::Clock, CoreError};

pub struct ScheduleService;

impl ScheduleService {
    /// Occurrences of every bill in `[start, end]`, sorted by due date then bill id.
    pub fn instances_in_window<'a, I>(
        bills: I,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<BillInstance>, CoreError>
    where
        I: IntoIterator<Item = &'a Bill>,
    {
        if start > end {
            return Err(RangeError::Inverted { start, end }.into());
        }
        let mut instances = Vec::new();
        for bill in bills {
            instances.extend(iter_instances_in_range(bill, start, end)?);
        }
        instances.sort();
        debug!(%start, %end, count = instances.len(), "window materialized");
        Ok(instances)
    }

    /// Exact sum of every amount due in `[start, end]`.
    pub fn total_due<'a, I>(bills: I, start: NaiveDate, end: NaiveDate) -> Result<Decimal, CoreError>
    where
        I: IntoIterator<Item = &'a Bill>,
    {
        Ok(Self::instances_in_window(bills, start, end)?
            .iter()
            .map(BillInstance::amount_due)
            .sum())
    }

    /// Per-bill subtotals in `[start, end]`; bills with nothing due are omitted.
    pub fn totals_by_bill<'a, I>(
        bills: I,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<BTreeMap<String, Decimal>, CoreError>
    where
        I: IntoIterator<Item = &'a Bill>,
    {
        let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
        for instance in Self::instances_in_window(bills, start, end)? {
            *totals.entry(instance.bill_id().to_string()).or_default() += instance.amount_due();
        }
        Ok(totals)
    }

    /// Occurrences from today through `horizon_days` ahead, inclusive.
    pub fn upcoming<'a, I>(
        bills: I,
        clock: &dyn Clock,
        horizon_days: u32,
    ) -> Result<Vec<BillInstance>, CoreError>
    where
        I: IntoIterator<Item = &'a Bill>,
    {
        let today = clock.today();
        let end = today
            .checked_add_days(Days::new(u64::from(horizon_days)))
            .unwrap_or(NaiveDate::MAX);
        Self::instances_in_window(bills, today, end)
    }

    /// First occurrence on or after `date`, if the bill has one.
    pub fn next_due(bill: &Bill, date: NaiveDate) -> Option<BillInstance> {
        iter_instances_in_range(bill, date, NaiveDate::MAX)
            .ok()?
            .next()
    }
}
