//! Calendar arithmetic for billing periods
//!
//! Billing is month-based: a membership accrues one share per calendar month
//! boundary crossed, and coverage is projected forward in whole months from
//! the service's billing day.

use chrono::{Datelike, Months, NaiveDate};

/// Number of calendar month boundaries between `start` and `end`
///
/// Only the year and month of each date matter, so Jan 31 → Feb 1 is one
/// month while Jan 1 → Jan 31 is zero. Negative when `end` precedes `start`.
pub fn calendar_months_between(start: NaiveDate, end: NaiveDate) -> i64 {
    let years = i64::from(end.year()) - i64::from(start.year());
    let months = i64::from(end.month()) - i64::from(start.month());
    years * 12 + months
}

/// Last day of the month containing `date`
pub fn last_day_of_month(date: NaiveDate) -> u32 {
    let first = date.with_day(1).unwrap_or(date);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

/// Move `date` to `day` of the same month, clamped to the month's length
pub fn with_day_clamped(date: NaiveDate, day: u32) -> NaiveDate {
    let day = day.clamp(1, last_day_of_month(date));
    date.with_day(day).unwrap_or(date)
}

/// Shift `date` by a signed number of months, clamping the day of month
pub fn shift_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        date.checked_add_months(magnitude)
    } else {
        date.checked_sub_months(magnitude)
    }
}

/// Number of full months from `earlier` to `later` (day of month respected)
fn full_months_between(earlier: NaiveDate, later: NaiveDate) -> i64 {
    let mut months = calendar_months_between(earlier, later);
    if months > 0 && later.day() < earlier.day() {
        months -= 1;
    }
    months.max(0)
}

/// Human-readable distance between two dates, without direction
///
/// Produces labels like "3 days", "about 1 month", "5 months" or
/// "over 1 year".
pub fn humanize_distance(a: NaiveDate, b: NaiveDate) -> String {
    let (earlier, later) = if a <= b { (a, b) } else { (b, a) };
    let days = (later - earlier).num_days();

    match days {
        0 => "less than a day".to_string(),
        1 => "1 day".to_string(),
        2..=29 => format!("{} days", days),
        30..=44 => "about 1 month".to_string(),
        45..=59 => "about 2 months".to_string(),
        _ => {
            let months = full_months_between(earlier, later);
            if months < 12 {
                // nearest count of 30-day months, halves rounding up
                let nearest = (days + 15) / 30;
                return format!("{} months", nearest);
            }
            let years = months / 12;
            let remainder = months % 12;
            if remainder < 3 {
                format!("about {} {}", years, plural(years, "year"))
            } else if remainder < 9 {
                format!("over {} {}", years, plural(years, "year"))
            } else {
                format!("almost {} {}", years + 1, plural(years + 1, "year"))
            }
        }
    }
}

fn plural(count: i64, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_calendar_months_between() {
        assert_eq!(calendar_months_between(date(2024, 1, 31), date(2024, 2, 1)), 1);
        assert_eq!(calendar_months_between(date(2024, 1, 1), date(2024, 1, 31)), 0);
        assert_eq!(calendar_months_between(date(2023, 11, 15), date(2024, 3, 1)), 4);
        assert_eq!(calendar_months_between(date(2024, 3, 1), date(2024, 1, 1)), -2);
    }

    #[test]
    fn test_with_day_clamped() {
        assert_eq!(with_day_clamped(date(2024, 2, 10), 31), date(2024, 2, 29));
        assert_eq!(with_day_clamped(date(2023, 2, 10), 31), date(2023, 2, 28));
        assert_eq!(with_day_clamped(date(2024, 5, 10), 15), date(2024, 5, 15));
        assert_eq!(with_day_clamped(date(2024, 5, 10), 0), date(2024, 5, 1));
    }

    #[test]
    fn test_shift_months() {
        assert_eq!(shift_months(date(2024, 1, 31), 1), Some(date(2024, 2, 29)));
        assert_eq!(shift_months(date(2024, 5, 15), 2), Some(date(2024, 7, 15)));
        assert_eq!(shift_months(date(2024, 5, 15), -5), Some(date(2023, 12, 15)));
        assert_eq!(shift_months(date(2024, 5, 15), 0), Some(date(2024, 5, 15)));
    }

    #[test]
    fn test_humanize_distance() {
        let today = date(2024, 5, 10);
        assert_eq!(humanize_distance(today, today), "less than a day");
        assert_eq!(humanize_distance(date(2024, 5, 11), today), "1 day");
        assert_eq!(humanize_distance(date(2024, 5, 15), today), "5 days");
        assert_eq!(humanize_distance(date(2024, 6, 10), today), "about 1 month");
        assert_eq!(humanize_distance(date(2024, 7, 1), today), "about 2 months");
        assert_eq!(humanize_distance(date(2024, 7, 15), today), "2 months");
        assert_eq!(humanize_distance(date(2024, 7, 24), today), "3 months");
        assert_eq!(humanize_distance(date(2024, 10, 10), today), "5 months");
        assert_eq!(humanize_distance(date(2025, 5, 5), today), "12 months");
        assert_eq!(humanize_distance(date(2025, 6, 10), today), "about 1 year");
        assert_eq!(humanize_distance(date(2025, 11, 10), today), "over 1 year");
        assert_eq!(humanize_distance(date(2026, 3, 10), today), "almost 2 years");
    }

    #[test]
    fn test_humanize_distance_is_symmetric() {
        let a = date(2024, 1, 1);
        let b = date(2024, 3, 15);
        assert_eq!(humanize_distance(a, b), humanize_distance(b, a));
    }
}
