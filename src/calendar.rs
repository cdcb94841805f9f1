//! Calendar Math - Gregorian leap-year rule and day-of-year dates
//!
//! Every other module goes through [`is_leap`]; the leap-year rule is not
//! restated anywhere else in the crate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when building a [`CalendarDate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("year {0} is out of range (must be in 1..={max})", max = MAX_YEAR)]
    YearOutOfRange(i32),

    #[error("day-of-year {day} is out of range for year {year} (1..={max})")]
    DayOutOfRange { year: i32, day: u16, max: u16 },
}

/// Largest supported year. Keeps every week-year computation (`year + 1`)
/// and the four-digit display in range.
pub const MAX_YEAR: i32 = 9999;

/// Gregorian leap-year predicate: divisible by 4, and not by 100 unless by 400.
#[inline]
pub const fn is_leap(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Branch-light form of [`is_leap`] used by the bit-twiddled variants.
///
/// `year & 3 == 0` is divisibility by 4 for any `i32`, negative years
/// included; the century terms are the same as in [`is_leap`].
#[inline]
pub const fn is_leap_bitwise(year: i32) -> u32 {
    ((year & 3) == 0 && ((year % 100) != 0 || (year % 400) == 0)) as u32
}

/// Number of days in `year`: 366 for leap years, 365 otherwise.
#[inline]
pub const fn days_in_year(year: i32) -> u16 {
    if is_leap(year) { 366 } else { 365 }
}

/// ISO weekday (1 = Monday .. 7 = Sunday) of January 1 of `year`.
///
/// Century/remainder decomposition of `year - 1`, restricted to Jan 1.
#[inline]
pub const fn jan1_weekday(year: i32) -> u32 {
    let prev = year - 1;
    let yy = prev % 100;
    let c = prev - yy;
    let g = yy + yy / 4;
    (1 + ((((c / 100) % 4) * 5 + g) % 7)) as u32
}

/// A Gregorian date expressed as year + 1-based day-of-year.
///
/// Always valid: `day_of_year` never exceeds [`days_in_year`] for `year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CalendarDate {
    year: i32,
    day_of_year: u16,
}

impl CalendarDate {
    /// Build a validated date.
    pub fn new(year: i32, day_of_year: u16) -> Result<Self, DateError> {
        if !(1..=MAX_YEAR).contains(&year) {
            return Err(DateError::YearOutOfRange(year));
        }
        let max = days_in_year(year);
        if day_of_year == 0 || day_of_year > max {
            return Err(DateError::DayOutOfRange {
                year,
                day: day_of_year,
                max,
            });
        }
        Ok(Self { year, day_of_year })
    }

    #[inline]
    pub fn year(&self) -> i32 {
        self.year
    }

    #[inline]
    pub fn day_of_year(&self) -> u16 {
        self.day_of_year
    }

    pub fn is_leap_year(&self) -> bool {
        is_leap(self.year)
    }
}

impl std::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:03}", self.year, self.day_of_year)
    }
}

// Deserialization must not bypass validation.
impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            year: i32,
            day_of_year: u16,
        }
        let raw = Raw::deserialize(deserializer)?;
        CalendarDate::new(raw.year, raw.day_of_year).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_leap_rule() {
        assert!(is_leap(2004));
        assert!(is_leap(2000));
        assert!(is_leap(2400));
        assert!(!is_leap(1900));
        assert!(!is_leap(2100));
        assert!(!is_leap(1999));
    }

    #[test]
    fn test_bitwise_leap_matches_rule() {
        for year in -4000..=4000 {
            assert_eq!(
                is_leap_bitwise(year) == 1,
                is_leap(year),
                "leap mismatch at {}",
                year
            );
        }
    }

    #[test]
    fn test_days_in_year() {
        assert_eq!(days_in_year(2024), 366);
        assert_eq!(days_in_year(2023), 365);
        assert_eq!(days_in_year(1900), 365);
    }

    #[test]
    fn test_jan1_weekday_known_years() {
        // 1999-01-01 Friday, 2000-01-01 Saturday, 2004-01-01 Thursday,
        // 2024-01-01 Monday, 2023-01-01 Sunday
        assert_eq!(jan1_weekday(1999), 5);
        assert_eq!(jan1_weekday(2000), 6);
        assert_eq!(jan1_weekday(2004), 4);
        assert_eq!(jan1_weekday(2024), 1);
        assert_eq!(jan1_weekday(2023), 7);
    }

    #[test]
    fn test_date_validation() {
        assert!(CalendarDate::new(2004, 366).is_ok());
        assert_eq!(
            CalendarDate::new(2003, 366),
            Err(DateError::DayOutOfRange {
                year: 2003,
                day: 366,
                max: 365
            })
        );
        assert!(CalendarDate::new(2003, 0).is_err());
        assert_eq!(
            CalendarDate::new(0, 1),
            Err(DateError::YearOutOfRange(0))
        );
    }

    #[test]
    fn test_year_upper_bound() {
        assert!(CalendarDate::new(MAX_YEAR, 365).is_ok());
        assert_eq!(
            CalendarDate::new(MAX_YEAR + 1, 1),
            Err(DateError::YearOutOfRange(MAX_YEAR + 1))
        );
        assert_eq!(
            CalendarDate::new(i32::MAX, 364),
            Err(DateError::YearOutOfRange(i32::MAX))
        );
    }

    #[test]
    fn test_deserialize_rejects_invalid_day() {
        let ok: CalendarDate = serde_yaml::from_str("year: 2004\nday_of_year: 60\n").unwrap();
        assert_eq!(ok.day_of_year(), 60);

        let bad: Result<CalendarDate, _> =
            serde_yaml::from_str("year: 1900\nday_of_year: 366\n");
        assert!(bad.is_err());
    }
}
