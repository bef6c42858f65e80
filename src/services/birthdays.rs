//! Birthday-window computation for the aniversariantes listing.

use chrono::{Datelike, Duration, NaiveDate};

/// How far ahead the aniversariantes listing looks.
pub const UPCOMING_WINDOW_DAYS: i64 = 30;

/// Project the birth date's month/day into the current year; if that date
/// already passed, roll to next year. Returns `None` when the projection does
/// not exist (Feb 29 in a non-leap year), in which case the client is skipped.
pub fn next_birthday(birth: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    let this_year = NaiveDate::from_ymd_opt(today.year(), birth.month(), birth.day())?;
    if this_year < today {
        NaiveDate::from_ymd_opt(today.year() + 1, birth.month(), birth.day())
    } else {
        Some(this_year)
    }
}

/// True when the next birthday falls within today through today + window.
pub fn in_upcoming_window(next: NaiveDate, today: NaiveDate, window_days: i64) -> bool {
    next >= today && next <= today + Duration::days(window_days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn birthday_two_days_ahead_is_included() {
        let today = d(2026, 8, 27);
        let birth = d(1990, 8, 29);
        let next = next_birthday(birth, today).unwrap();
        assert_eq!(next, d(2026, 8, 29));
        assert!(in_upcoming_window(next, today, UPCOMING_WINDOW_DAYS));
    }

    #[test]
    fn birthday_today_is_included() {
        let today = d(2026, 8, 27);
        let next = next_birthday(d(1990, 8, 27), today).unwrap();
        assert_eq!(next, today);
        assert!(in_upcoming_window(next, today, UPCOMING_WINDOW_DAYS));
    }

    #[test]
    fn birthday_exactly_thirty_days_ahead_is_included() {
        let today = d(2026, 8, 27);
        let next = next_birthday(d(1985, 9, 26), today).unwrap();
        assert_eq!(next, d(2026, 9, 26));
        assert!(in_upcoming_window(next, today, UPCOMING_WINDOW_DAYS));
    }

    #[test]
    fn birthday_thirty_one_days_ahead_is_excluded() {
        let today = d(2026, 8, 27);
        let next = next_birthday(d(1985, 9, 27), today).unwrap();
        assert_eq!(next, d(2026, 9, 27));
        assert!(!in_upcoming_window(next, today, UPCOMING_WINDOW_DAYS));
    }

    #[test]
    fn birthday_yesterday_rolls_to_next_year_and_is_excluded() {
        let today = d(2026, 8, 27);
        let next = next_birthday(d(1990, 8, 26), today).unwrap();
        assert_eq!(next, d(2027, 8, 26));
        assert!(!in_upcoming_window(next, today, UPCOMING_WINDOW_DAYS));
    }

    #[test]
    fn window_crosses_year_boundary() {
        let today = d(2026, 12, 20);
        let next = next_birthday(d(1990, 1, 10), today).unwrap();
        assert_eq!(next, d(2027, 1, 10));
        assert!(in_upcoming_window(next, today, UPCOMING_WINDOW_DAYS));
    }

    #[test]
    fn feb_29_birth_has_no_projection_in_common_years() {
        // 2026 is not a leap year; matches the skip-with-log behavior
        assert_eq!(next_birthday(d(1992, 2, 29), d(2026, 2, 1)), None);
    }

    #[test]
    fn feb_29_birth_projects_in_leap_years() {
        let next = next_birthday(d(1992, 2, 29), d(2028, 2, 1)).unwrap();
        assert_eq!(next, d(2028, 2, 29));
    }
}
