//! Early-return form: same arithmetic as the reference, but each rule
//! returns immediately instead of funnelling through one exit.

use super::WeekDateStrategy;
use crate::calendar::{CalendarDate, days_in_year, is_leap};

#[derive(Debug, Clone, Copy, Default)]
pub struct EarlyReturn;

impl WeekDateStrategy for EarlyReturn {
    fn name(&self) -> &'static str {
        "V1_EarlyReturn"
    }

    fn week_number(&self, date: CalendarDate) -> u32 {
        let y = date.year();
        let day = date.day_of_year() as i32;

        let yy = (y - 1) % 100;
        let c = (y - 1) - yy;
        let g = yy + yy / 4;
        let jan1 = 1 + ((((c / 100) % 4) * 5 + g) % 7);

        let h = day + (jan1 - 1);
        let weekday = 1 + ((h - 1) % 7);

        if day <= 8 - jan1 && jan1 > 4 {
            return if jan1 == 5 || (jan1 == 6 && is_leap(y - 1)) {
                53
            } else {
                52
            };
        }

        if (days_in_year(y) as i32 - day) < (4 - weekday) {
            return 1;
        }

        let j = day + (7 - weekday) + (jan1 - 1);
        let mut week = j / 7;
        if jan1 > 4 {
            week -= 1;
        }
        week as u32
    }
}
