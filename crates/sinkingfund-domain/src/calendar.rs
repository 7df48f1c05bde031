//! Calendar arithmetic for recurrence stepping.
//!
//! Month and year steps clamp the day-of-month to the last valid day of the
//! target month, so Jan 31 + 1 month lands on Feb 28 (or Feb 29) and Feb 29 +
//! 1 year lands on Feb 28. Clamping is always computed from the date passed
//! in, never from an earlier clamped result.

use std::fmt;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
/// Enumerates the supported recurrence units.
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Canonical lowercase name, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }

    /// Human-readable cadence, e.g. "Monthly" or "Every 3 Months".
    pub fn label(self, interval: u32) -> String {
        let (unit, single) = match self {
            Frequency::Daily => ("Day", "Daily"),
            Frequency::Weekly => ("Week", "Weekly"),
            Frequency::Monthly => ("Month", "Monthly"),
            Frequency::Yearly => ("Year", "Yearly"),
        };
        match interval {
            1 => single.to_string(),
            n => format!("Every {} {}s", n, unit),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the date exactly `interval` frequency steps after `date`.
///
/// Saturates at [`NaiveDate::MAX`] when the result would fall outside the
/// representable range.
pub fn advance(date: NaiveDate, frequency: Frequency, interval: u32) -> NaiveDate {
    checked_advance(date, frequency, u64::from(interval)).unwrap_or(NaiveDate::MAX)
}

/// Same as [`advance`] but takes a wide step count and reports overflow as `None`.
pub fn checked_advance(date: NaiveDate, frequency: Frequency, steps: u64) -> Option<NaiveDate> {
    match frequency {
        Frequency::Daily => date.checked_add_days(Days::new(steps)),
        Frequency::Weekly => date.checked_add_days(Days::new(steps.checked_mul(7)?)),
        Frequency::Monthly => shift_months(date, steps),
        Frequency::Yearly => shift_months(date, steps.checked_mul(12)?),
    }
}

/// Number of calendar-month boundaries between `from` and `to`, ignoring days.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    month_index(to) - month_index(from)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ if is_leap_year(year) => 29,
        _ => 28,
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

fn shift_months(date: NaiveDate, months: u64) -> Option<NaiveDate> {
    let target = month_index(date).checked_add(i64::try_from(months).ok()?)?;
    let year = i32::try_from(target.div_euclid(12)).ok()?;
    let month = target.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn daily_and_weekly_add_plain_days() {
        let start = ymd(2025, 1, 1);
        assert_eq!(advance(start, Frequency::Daily, 3), ymd(2025, 1, 4));
        assert_eq!(advance(start, Frequency::Weekly, 2), ymd(2025, 1, 15));
        assert_eq!(advance(ymd(2024, 12, 30), Frequency::Daily, 3), ymd(2025, 1, 2));
    }

    #[test]
    fn monthly_clamps_to_month_end() {
        assert_eq!(advance(ymd(2023, 1, 31), Frequency::Monthly, 1), ymd(2023, 2, 28));
        assert_eq!(advance(ymd(2024, 1, 31), Frequency::Monthly, 1), ymd(2024, 2, 29));
        assert_eq!(advance(ymd(2024, 1, 31), Frequency::Monthly, 3), ymd(2024, 4, 30));
        assert_eq!(advance(ymd(2024, 11, 30), Frequency::Monthly, 3), ymd(2025, 2, 28));
    }

    #[test]
    fn yearly_clamps_leap_day() {
        assert_eq!(advance(ymd(2020, 2, 29), Frequency::Yearly, 1), ymd(2021, 2, 28));
        assert_eq!(advance(ymd(2020, 2, 29), Frequency::Yearly, 4), ymd(2024, 2, 29));
        assert_eq!(advance(ymd(2000, 2, 29), Frequency::Yearly, 100), ymd(2100, 2, 28));
    }

    #[test]
    fn zero_interval_is_identity() {
        let date = ymd(2024, 5, 31);
        for frequency in [
            Frequency::Daily,
            Frequency::Weekly,
            Frequency::Monthly,
            Frequency::Yearly,
        ] {
            assert_eq!(advance(date, frequency, 0), date);
        }
    }

    #[test]
    fn overflow_saturates_or_reports_none() {
        let late = NaiveDate::MAX;
        assert_eq!(advance(late, Frequency::Monthly, 1), NaiveDate::MAX);
        assert_eq!(checked_advance(late, Frequency::Daily, 1), None);
        assert_eq!(checked_advance(ymd(2024, 1, 1), Frequency::Yearly, u64::MAX), None);
    }

    #[test]
    fn months_between_ignores_day_of_month() {
        assert_eq!(months_between(ymd(2024, 1, 31), ymd(2024, 2, 1)), 1);
        assert_eq!(months_between(ymd(2024, 3, 1), ymd(2023, 12, 31)), -3);
    }

    #[test]
    fn labels_read_naturally() {
        assert_eq!(Frequency::Monthly.label(1), "Monthly");
        assert_eq!(Frequency::Weekly.label(2), "Every 2 Weeks");
        assert_eq!(Frequency::Yearly.label(1), "Yearly");
        assert_eq!(Frequency::Daily.label(10), "Every 10 Days");
    }
}
