//! Calendar side-information derived from a date.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Calendar features of a single day.
///
/// `day_of_week` counts from Monday = 0 to Sunday = 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CalendarFeatures {
    year: i32,
    month: u32,
    day: u32,
    day_of_year: u32,
    day_of_week: u32,
}

impl CalendarFeatures {
    /// Derives the features of `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
            day_of_year: date.ordinal(),
            day_of_week: date.weekday().num_days_from_monday(),
        }
    }

    /// Returns the calendar year.
    pub fn year(self) -> i32 {
        self.year
    }

    /// Returns the month (1..=12).
    pub fn month(self) -> u32 {
        self.month
    }

    /// Returns the day within the month (1..=31).
    pub fn day(self) -> u32 {
        self.day
    }

    /// Returns the day-of-year (1..=366).
    pub fn day_of_year(self) -> u32 {
        self.day_of_year
    }

    /// Returns the day-of-week (Monday = 0 .. Sunday = 6).
    pub fn day_of_week(self) -> u32 {
        self.day_of_week
    }

    /// Returns the calendar quarter (1..=4).
    pub fn quarter(self) -> u32 {
        (self.month - 1) / 3 + 1
    }
}

impl From<NaiveDate> for CalendarFeatures {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn jan_first_monday() {
        // 2024-01-01 was a Monday.
        let f = CalendarFeatures::from_date(ymd(2024, 1, 1));
        assert_eq!(f.year(), 2024);
        assert_eq!(f.month(), 1);
        assert_eq!(f.day(), 1);
        assert_eq!(f.day_of_year(), 1);
        assert_eq!(f.day_of_week(), 0);
        assert_eq!(f.quarter(), 1);
    }

    #[test]
    fn leap_day() {
        let f = CalendarFeatures::from_date(ymd(2024, 2, 29));
        assert_eq!(f.day_of_year(), 60);
        assert_eq!(f.day_of_week(), 3); // Thursday
    }

    #[test]
    fn dec_31_leap_and_common() {
        assert_eq!(CalendarFeatures::from_date(ymd(2024, 12, 31)).day_of_year(), 366);
        assert_eq!(CalendarFeatures::from_date(ymd(2023, 12, 31)).day_of_year(), 365);
    }

    #[test]
    fn sunday_is_six() {
        // 2020-03-01 was a Sunday.
        assert_eq!(CalendarFeatures::from_date(ymd(2020, 3, 1)).day_of_week(), 6);
    }

    #[test]
    fn quarters() {
        let quarters: Vec<u32> = (1..=12)
            .map(|m| CalendarFeatures::from_date(ymd(2001, m, 1)).quarter())
            .collect();
        assert_eq!(quarters, vec![1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4]);
    }

    #[test]
    fn from_impl_matches_constructor() {
        let d = ymd(1995, 7, 14);
        assert_eq!(CalendarFeatures::from(d), CalendarFeatures::from_date(d));
    }

    #[test]
    fn serializes_field_names() {
        let json = serde_json::to_string(&CalendarFeatures::from_date(ymd(2000, 1, 2))).unwrap();
        assert!(json.contains("\"day_of_year\":2"));
        assert!(json.contains("\"day_of_week\":6"));
    }
}
