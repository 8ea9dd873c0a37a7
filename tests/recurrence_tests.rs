use chrono::NaiveDate;
use mio_finance::domain::{BillingInterval, IntervalUnit};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn test_interval_next_date_per_unit() {
    let start = d(2026, 1, 1);

    let day = BillingInterval::new(3, IntervalUnit::Day);
    assert_eq!(day.next_date(start), d(2026, 1, 4));

    let week = BillingInterval::new(2, IntervalUnit::Week);
    assert_eq!(week.next_date(start), d(2026, 1, 15));

    let month = BillingInterval::new(1, IntervalUnit::Month);
    assert_eq!(month.next_date(start), d(2026, 2, 1));

    let year = BillingInterval::new(1, IntervalUnit::Year);
    assert_eq!(year.next_date(start), d(2027, 1, 1));
}

#[test]
fn test_month_end_clamping_sequence() {
    let monthly = BillingInterval::monthly();

    // Non-leap year: Jan 31 -> Feb 28 -> Mar 28, never Mar 3 or Mar 31.
    let feb = monthly.next_date(d(2026, 1, 31));
    assert_eq!(feb, d(2026, 2, 28));
    assert_eq!(monthly.next_date(feb), d(2026, 3, 28));

    // Leap year lands on Feb 29.
    assert_eq!(monthly.next_date(d(2024, 1, 31)), d(2024, 2, 29));
}

#[test]
fn test_multi_month_steps_cross_year_boundary() {
    let quarterly = BillingInterval::new(3, IntervalUnit::Month);
    assert_eq!(quarterly.next_date(d(2026, 11, 30)), d(2027, 2, 28));

    let eighteen = BillingInterval::new(18, IntervalUnit::Month);
    assert_eq!(eighteen.next_date(d(2026, 8, 31)), d(2028, 2, 29));
}

#[test]
fn test_year_unit_equals_twelve_month_steps() {
    let yearly = BillingInterval::new(2, IntervalUnit::Year);
    let months = BillingInterval::new(24, IntervalUnit::Month);
    for anchor in [d(2024, 2, 29), d(2026, 1, 31), d(2026, 6, 15), d(2027, 12, 31)] {
        assert_eq!(yearly.next_date(anchor), months.next_date(anchor));
    }
    // Feb 29 anchors clamp to Feb 28 in common years.
    assert_eq!(
        BillingInterval::new(1, IntervalUnit::Year).next_date(d(2024, 2, 29)),
        d(2025, 2, 28)
    );
}

#[test]
fn test_weekly_steps_are_plain_day_arithmetic() {
    let biweekly = BillingInterval::new(2, IntervalUnit::Week);
    // Crosses a month boundary without any clamping involved.
    assert_eq!(biweekly.next_date(d(2026, 1, 25)), d(2026, 2, 8));
}

#[test]
fn test_labels() {
    assert_eq!(BillingInterval::monthly().label(), "Monthly");
    assert_eq!(BillingInterval::new(2, IntervalUnit::Week).label(), "Every 2 Weeks");
    assert_eq!(BillingInterval::new(1, IntervalUnit::Year).label(), "Yearly");
}
