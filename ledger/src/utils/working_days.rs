//! Working-day arithmetic for vacation ranges.
//!
//! Only Saturday and Sunday are excluded. Public holidays count as working
//! days; no holiday calendar is consulted.

use chrono::{Datelike, NaiveDate, Weekday};

pub fn is_working_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Counts Monday-Friday dates in `start..=end`.
///
/// An inverted range yields 0.
pub fn count_working_days(start: NaiveDate, end: NaiveDate) -> u32 {
    if start > end {
        return 0;
    }

    let mut cursor = start;
    let mut count = 0;
    loop {
        if is_working_day(cursor) {
            count += 1;
        }
        if cursor == end {
            break;
        }
        cursor = match cursor.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    count
}
