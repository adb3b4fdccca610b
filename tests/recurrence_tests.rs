use chrono::NaiveDate;
use happenings::recurrence::{expand_recurrence, recurrence_weekday};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_weekly_end_date_is_inclusive() {
    // Sep 4, 11, 18, 25 — the end date lands exactly on an instance
    let dates = expand_recurrence(date(2026, 9, 4), "weekly", Some(date(2026, 9, 25)));

    assert_eq!(
        dates,
        vec![
            date(2026, 9, 4),
            date(2026, 9, 11),
            date(2026, 9, 18),
            date(2026, 9, 25),
        ]
    );
}

#[test]
fn test_weekly_stops_before_unaligned_end_date() {
    // The end date falls between instances; the series stops at the last
    // instance on or before it
    let dates = expand_recurrence(date(2026, 9, 4), "weekly", Some(date(2026, 9, 23)));

    assert_eq!(
        dates,
        vec![date(2026, 9, 4), date(2026, 9, 11), date(2026, 9, 18)]
    );
}

#[test]
fn test_weekly_default_horizon_is_one_year() {
    // No end date: 52 weeks out, inclusive, so 53 instances total
    let start = date(2026, 1, 1);
    let dates = expand_recurrence(start, "weekly", None);

    assert_eq!(dates.len(), 53);
    assert_eq!(dates[0], start);
    assert_eq!(*dates.last().unwrap(), date(2026, 12, 31));
}

#[test]
fn test_biweekly_default_horizon() {
    let dates = expand_recurrence(date(2026, 1, 1), "biweekly", None);

    // 14-day steps within 364 days: start plus 26 more
    assert_eq!(dates.len(), 27);
    assert_eq!(dates[1], date(2026, 1, 15));
}

#[test]
fn test_monthly_default_horizon() {
    let dates = expand_recurrence(date(2026, 1, 15), "monthly", None);

    // Jan through Dec; the 13th instance would overshoot the horizon
    assert_eq!(dates.len(), 12);
    assert_eq!(*dates.last().unwrap(), date(2026, 12, 15));
}

#[test]
fn test_monthly_clamps_to_month_end() {
    // Jan 31 + 1 month clamps to Feb 28 in a non-leap year
    let dates = expand_recurrence(date(2026, 1, 31), "monthly", Some(date(2026, 2, 28)));

    assert_eq!(dates, vec![date(2026, 1, 31), date(2026, 2, 28)]);
}

#[test]
fn test_series_is_capped_at_100_instances() {
    // A far-future end date must not produce an unbounded series
    let dates = expand_recurrence(date(2026, 1, 1), "weekly", Some(date(2036, 1, 1)));

    assert_eq!(dates.len(), 100);
}

#[test]
fn test_unknown_pattern_degrades_to_one_off() {
    let start = date(2026, 9, 4);
    let dates = expand_recurrence(start, "fortnightly", Some(date(2027, 9, 4)));

    assert_eq!(dates, vec![start]);
}

#[test]
fn test_end_date_before_start_keeps_the_start() {
    let start = date(2026, 9, 4);
    let dates = expand_recurrence(start, "weekly", Some(date(2026, 8, 1)));

    assert_eq!(dates, vec![start]);
}

#[test]
fn test_recurrence_weekday_is_sunday_based() {
    // Aug 30 2026 is a Sunday, Aug 28 a Friday
    assert_eq!(recurrence_weekday(date(2026, 8, 30)), 0);
    assert_eq!(recurrence_weekday(date(2026, 8, 28)), 5);
}
