//! Billing-interval arithmetic for recurring obligations.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Enumerates time units used by `BillingInterval`.
pub enum IntervalUnit {
    Day,
    Week,
    Month,
    Year,
}

impl IntervalUnit {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "day" | "days" => Some(IntervalUnit::Day),
            "week" | "weeks" => Some(IntervalUnit::Week),
            "month" | "months" => Some(IntervalUnit::Month),
            "year" | "years" => Some(IntervalUnit::Year),
            _ => None,
        }
    }
}

impl fmt::Display for IntervalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IntervalUnit::Day => "Day",
            IntervalUnit::Week => "Week",
            IntervalUnit::Month => "Month",
            IntervalUnit::Year => "Year",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// Represents how often a subscription comes due: every N days/weeks/months/years.
pub struct BillingInterval {
    pub every: u32,
    pub unit: IntervalUnit,
}

impl BillingInterval {
    pub fn new(every: u32, unit: IntervalUnit) -> Self {
        Self { every, unit }
    }

    pub fn monthly() -> Self {
        Self::new(1, IntervalUnit::Month)
    }

    /// Calculates the next due date after `from` according to the interval.
    ///
    /// Month and year steps clamp the day-of-month to the last valid day of
    /// the target month, so Jan 31 plus one month lands on Feb 28 (or Feb 29
    /// in leap years), never on Mar 3. A zero step count is treated as 1.
    pub fn next_date(&self, from: NaiveDate) -> NaiveDate {
        let step = self.every.max(1);
        match self.unit {
            IntervalUnit::Day => from + Duration::days(step as i64),
            IntervalUnit::Week => from + Duration::weeks(step as i64),
            IntervalUnit::Month => shift_month(from, step as i32),
            IntervalUnit::Year => shift_month(from, step as i32 * 12),
        }
    }

    pub fn label(&self) -> String {
        match (self.every, &self.unit) {
            (1, IntervalUnit::Day) => "Daily".into(),
            (1, IntervalUnit::Week) => "Weekly".into(),
            (1, IntervalUnit::Month) => "Monthly".into(),
            (1, IntervalUnit::Year) => "Yearly".into(),
            (n, unit) => format!("Every {} {}{}", n, unit, if n > 1 { "s" } else { "" }),
        }
    }
}

impl Default for BillingInterval {
    fn default() -> Self {
        Self::monthly()
    }
}

fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    use chrono::Datelike;

    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    let mut day = date.day();
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    day = day.min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap_or(date)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}
