//! Reference form - the baseline every other variant is checked against.
//!
//! Single exit point; tracks which ISO week-year the date falls into before
//! deciding the week number, so the week-year comes for free.

use serde::Serialize;

use super::WeekDateStrategy;
use crate::calendar::{CalendarDate, days_in_year, is_leap, jan1_weekday};

// `CalendarDate` caps the year at `MAX_YEAR`, so `y + 1` below cannot overflow.

/// ISO 8601 week-year and week number of a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IsoWeek {
    /// Week-year; differs from the calendar year around Jan 1 / Dec 31.
    pub year: i32,
    pub week: u32,
}

/// Compute the ISO week-year and week number of `date`.
pub fn iso_week(date: CalendarDate) -> IsoWeek {
    let y = date.year();
    let d = date.day_of_year() as i32;

    let jan1 = jan1_weekday(y) as i32;
    let h = d + (jan1 - 1);
    let weekday = 1 + ((h - 1) % 7);

    let mut week_year = y;
    let mut week = 0;

    if d <= 8 - jan1 && jan1 > 4 {
        // Friday/Saturday/Sunday Jan 1: leading days belong to last week of y-1
        week_year = y - 1;
        week = if jan1 == 5 || (jan1 == 6 && is_leap(week_year)) {
            53
        } else {
            52
        };
    } else if (days_in_year(y) as i32 - d) < (4 - weekday) {
        // Trailing days of a week whose Thursday lies in y+1
        week_year = y + 1;
        week = 1;
    }

    if week_year == y {
        let j = d + (7 - weekday) + (jan1 - 1);
        week = j / 7;
        if jan1 > 4 {
            week -= 1;
        }
    }

    IsoWeek {
        year: week_year,
        week: week as u32,
    }
}

/// Straightforward single-exit form.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reference;

impl WeekDateStrategy for Reference {
    fn name(&self) -> &'static str {
        "Original"
    }

    #[inline]
    fn week_number(&self, date: CalendarDate) -> u32 {
        iso_week(date).week
    }
}
