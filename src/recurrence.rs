use chrono::{Datelike, Days, Months, NaiveDate};

/// Longest a series runs when no explicit end date is given.
const DEFAULT_HORIZON_WEEKS: u64 = 52;
/// Hard cap on instances per series, regardless of the end date.
const MAX_INSTANCES: usize = 100;

pub const PATTERN_WEEKLY: &str = "weekly";
pub const PATTERN_BIWEEKLY: &str = "biweekly";
pub const PATTERN_MONTHLY: &str = "monthly";

/// expand_recurrence
///
/// Expands a recurring submission into the concrete dates of the series. The
/// start date is always the first instance; subsequent instances step by the
/// pattern (7 days, 14 days, or one calendar month) up to and including the
/// end date. Without an end date the series runs for 52 weeks. The series is
/// capped at 100 instances either way.
///
/// An unrecognized pattern yields just the start date, so a malformed payload
/// degrades to a one-off event instead of failing.
pub fn expand_recurrence(
    start: NaiveDate,
    pattern: &str,
    end: Option<NaiveDate>,
) -> Vec<NaiveDate> {
    let mut dates = vec![start];

    let horizon = end.unwrap_or_else(|| {
        start
            .checked_add_days(Days::new(DEFAULT_HORIZON_WEEKS * 7))
            .unwrap_or(start)
    });

    let mut current = start;
    while current < horizon && dates.len() < MAX_INSTANCES {
        let next = match pattern {
            PATTERN_WEEKLY => current.checked_add_days(Days::new(7)),
            PATTERN_BIWEEKLY => current.checked_add_days(Days::new(14)),
            PATTERN_MONTHLY => current.checked_add_months(Months::new(1)),
            _ => return dates,
        };

        match next {
            Some(next) => {
                current = next;
                // The horizon itself is a valid instance date.
                if current <= horizon {
                    dates.push(current);
                }
            }
            // Calendar overflow; the series ends here.
            None => break,
        }
    }

    dates
}

/// recurrence_weekday
///
/// The 0-6, Sunday-based day-of-week tag stored on every row of a series.
pub fn recurrence_weekday(date: NaiveDate) -> i32 {
    date.weekday().num_days_from_sunday() as i32
}
