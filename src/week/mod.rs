//! Week Date Calculator - ISO 8601 week number strategies
//!
//! One capability, [`WeekDateStrategy`], with four concrete implementations that
//! differ only in how they arrange the arithmetic:
//!
//! - [`reference::Reference`] - single-exit form, also tracks the week-year
//! - [`early_return::EarlyReturn`] - returns as soon as a rule fires
//! - [`bit_ops::BitOps`] - shifts/masks and bool arithmetic instead of branches
//! - [`precalc::Precalculated`] - all year-dependent terms computed up front
//!
//! All four must return the same week number for every valid [`CalendarDate`].
//! [`Variant`] selects one of them by name at configuration time.

pub mod bit_ops;
pub mod early_return;
pub mod precalc;
pub mod reference;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::CalendarDate;

pub use bit_ops::BitOps;
pub use early_return::EarlyReturn;
pub use precalc::Precalculated;
pub use reference::{IsoWeek, Reference};

/// A way of computing the ISO 8601 week number (1..=53) of a date.
///
/// Implementations are pure: same input, same output, no side effects.
pub trait WeekDateStrategy {
    /// Stable display name, used in reports and CSV rows.
    fn name(&self) -> &'static str;

    fn week_number(&self, date: CalendarDate) -> u32;
}

impl<S: WeekDateStrategy + ?Sized> WeekDateStrategy for &S {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    #[inline]
    fn week_number(&self, date: CalendarDate) -> u32 {
        (**self).week_number(date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown variant '{0}' (expected one of: reference, early-return, bit-ops, precalc)")]
pub struct UnknownVariant(pub String);

/// Selector over the concrete strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    Reference,
    EarlyReturn,
    BitOps,
    Precalculated,
}

impl Variant {
    /// All variants, reference first.
    pub const ALL: [Variant; 4] = [
        Variant::Reference,
        Variant::EarlyReturn,
        Variant::BitOps,
        Variant::Precalculated,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Reference => Reference.name(),
            Variant::EarlyReturn => EarlyReturn.name(),
            Variant::BitOps => BitOps.name(),
            Variant::Precalculated => Precalculated.name(),
        }
    }
}

impl WeekDateStrategy for Variant {
    fn name(&self) -> &'static str {
        Variant::name(*self)
    }

    #[inline]
    fn week_number(&self, date: CalendarDate) -> u32 {
        match self {
            Variant::Reference => Reference.week_number(date),
            Variant::EarlyReturn => EarlyReturn.week_number(date),
            Variant::BitOps => BitOps.week_number(date),
            Variant::Precalculated => Precalculated.week_number(date),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "reference" | "original" => Ok(Variant::Reference),
            "early-return" | "v1" | "v1_earlyreturn" => Ok(Variant::EarlyReturn),
            "bit-ops" | "v2" | "v2_bitops" => Ok(Variant::BitOps),
            "precalc" | "precalculated" | "v4" | "v4_precalculation" => {
                Ok(Variant::Precalculated)
            }
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}
