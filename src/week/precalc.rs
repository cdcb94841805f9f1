//! Precalculation form: every year-dependent term (both leap flags, Jan 1
//! weekday, year length) is computed before any branch, so the branches
//! only compare precomputed values.

use super::WeekDateStrategy;
use crate::calendar::{CalendarDate, is_leap_bitwise};

#[derive(Debug, Clone, Copy, Default)]
pub struct Precalculated;

impl WeekDateStrategy for Precalculated {
    fn name(&self) -> &'static str {
        "V4_Precalculation"
    }

    fn week_number(&self, date: CalendarDate) -> u32 {
        let y = date.year();
        let day = date.day_of_year() as i32;
        let y_1 = y - 1;

        let prev_leap = is_leap_bitwise(y_1) != 0;
        let yy = y_1 % 100;
        let g = yy + (yy >> 2);
        let century = y_1 / 100;
        let jan1 = 1 + (((century & 3) * 5 + g) % 7);

        let days_in_year = 365 + is_leap_bitwise(y) as i32;

        let weekday = 1 + ((day + jan1 - 2) % 7);

        if (day <= 8 - jan1) & (jan1 > 4) {
            let is_53 = (jan1 == 5) | ((jan1 == 6) & prev_leap);
            return 52 + is_53 as u32;
        }

        if (days_in_year - day) < (4 - weekday) {
            return 1;
        }

        let j = day + (7 - weekday) + (jan1 - 1);
        ((j / 7) - (jan1 > 4) as i32) as u32
    }
}
