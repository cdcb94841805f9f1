//! Bitwise form: `>> 2` / `& 3` in place of `/ 4` / `% 4`, non-short-circuit
//! `&` / `|` on the rule guards, and bool-to-int arithmetic for the 52/53 and
//! year-start adjustments.
//!
//! The shift/mask substitutions are only valid for non-negative operands,
//! which `CalendarDate` guarantees (`year >= 1`).

use super::WeekDateStrategy;
use crate::calendar::{CalendarDate, is_leap_bitwise};

#[derive(Debug, Clone, Copy, Default)]
pub struct BitOps;

impl WeekDateStrategy for BitOps {
    fn name(&self) -> &'static str {
        "V2_BitOps"
    }

    fn week_number(&self, date: CalendarDate) -> u32 {
        let y = date.year();
        let day = date.day_of_year() as i32;

        let y_1 = y - 1;
        let yy = y_1 % 100;
        let c = y_1 - yy;
        let g = yy + (yy >> 2);
        let jan1 = 1 + ((((c / 100) & 3) * 5 + g) % 7);

        let weekday = 1 + ((day + jan1 - 2) % 7);

        if (day <= 8 - jan1) & (jan1 > 4) {
            let prev_leap = is_leap_bitwise(y_1) != 0;
            let is_53 = (jan1 == 5) | ((jan1 == 6) & prev_leap);
            return 52 + is_53 as u32;
        }

        let days_in_year = 365 + is_leap_bitwise(y) as i32;
        if (days_in_year - day) < (4 - weekday) {
            return 1;
        }

        let j = day + (7 - weekday) + (jan1 - 1);
        ((j / 7) - (jan1 > 4) as i32) as u32
    }
}
