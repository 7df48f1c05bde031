//! Materializes bill occurrences inside a date window.

use std::iter::FusedIterator;

use chrono::NaiveDate;
use tracing::debug;

use crate::bill::Bill;
use crate::calendar::{months_between, Frequency};
use crate::error::RangeError;
use crate::instance::BillInstance;

/// Lazy, single-pass cursor over the occurrences of one bill within a window.
///
/// Obtain a fresh cursor per consumer; it is deliberately not `Clone`.
#[derive(Debug)]
pub struct BillInstances<'a> {
    bill: &'a Bill,
    next_index: u64,
    window_end: NaiveDate,
    steps: u64,
    done: bool,
}

impl<'a> BillInstances<'a> {
    /// Number of calendar evaluations performed so far, fast-forward included.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn bill(&self) -> &'a Bill {
        self.bill
    }

    fn due_date_at(&mut self, index: u64) -> Option<NaiveDate> {
        self.steps += 1;
        self.bill.occurrence_date(index)
    }

    /// Returns the index of the first occurrence on or after `from`.
    fn fast_forward(&mut self, from: NaiveDate) -> u64 {
        let start = self.bill.start_date();
        let Some(schedule) = self.bill.schedule().copied() else {
            return 0;
        };
        if from <= start {
            return 0;
        }
        let interval = i64::from(schedule.interval());
        let estimate = match schedule.frequency() {
            Frequency::Daily => ceil_div((from - start).num_days(), interval),
            Frequency::Weekly => ceil_div((from - start).num_days(), 7 * interval),
            Frequency::Monthly => months_between(start, from).div_euclid(interval),
            Frequency::Yearly => months_between(start, from).div_euclid(12 * interval),
        };
        let mut index = u64::try_from(estimate.max(0)).unwrap_or(0);

        // Month-end clamping makes the estimate land up to one step early.
        while let Some(due) = self.due_date_at(index) {
            if due >= from {
                break;
            }
            index += 1;
        }
        while index > 0 {
            match self.due_date_at(index - 1) {
                Some(previous) if previous >= from => index -= 1,
                _ => break,
            }
        }
        debug!(
            bill_id = self.bill.bill_id(),
            index,
            steps = self.steps,
            "fast-forwarded to window start"
        );
        index
    }

    fn finish(&mut self) -> Option<BillInstance> {
        self.done = true;
        None
    }
}

impl Iterator for BillInstances<'_> {
    type Item = BillInstance;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if let Some(cap) = self.bill.occurrences() {
            if self.next_index >= u64::from(cap) {
                return self.finish();
            }
        }
        let Some(due) = self.due_date_at(self.next_index) else {
            return self.finish();
        };
        if due > self.window_end || self.bill.end_date().is_some_and(|end| due > end) {
            return self.finish();
        }
        self.next_index += 1;
        Some(BillInstance::new(
            self.bill.bill_id(),
            self.bill.amount_due(),
            due,
        ))
    }
}

impl FusedIterator for BillInstances<'_> {}

/// Lazily yields the occurrences of `bill` falling in `[start, end]`.
///
/// Fails when `start > end`, so misuse is distinguishable from an empty result.
pub fn iter_instances_in_range(
    bill: &Bill,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<BillInstances<'_>, RangeError> {
    if start > end {
        return Err(RangeError::Inverted { start, end });
    }
    let mut instances = BillInstances {
        bill,
        next_index: 0,
        window_end: end,
        steps: 0,
        done: false,
    };
    let span_overlaps =
        bill.start_date() <= end && bill.last_due_date().map_or(true, |last| last >= start);
    if !span_overlaps {
        debug!(
            bill_id = bill.bill_id(),
            %start,
            %end,
            "bill span does not overlap window"
        );
        instances.done = true;
        return Ok(instances);
    }
    instances.next_index = instances.fast_forward(start);
    Ok(instances)
}

/// Collects [`iter_instances_in_range`] for callers that need a length or random access.
pub fn instances_in_range(
    bill: &Bill,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<BillInstance>, RangeError> {
    Ok(iter_instances_in_range(bill, start, end)?.collect())
}

fn ceil_div(value: i64, divisor: i64) -> i64 {
    let quotient = value.div_euclid(divisor);
    if value.rem_euclid(divisor) == 0 {
        quotient
    } else {
        quotient + 1
    }
}
