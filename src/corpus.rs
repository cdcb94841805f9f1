//! Test Corpus Generator - deterministic benchmark inputs
//!
//! Produces the dates every variant is timed and validated on: uniformly random
//! dates first, then the structurally interesting ones (century starts, Feb 29).
//!
//! The generator never reaches for a global RNG. [`generate`] takes an
//! explicit [`Rng`]; [`generate_seeded`] builds the fixed-seed one used for
//! real runs, so two runs with the same [`BenchConfig`] see the same corpus.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::calendar::{CalendarDate, DateError, days_in_year, is_leap};
use crate::config::BenchConfig;

/// Literal seed for the benchmark corpus. Never derived from time or entropy.
pub const CORPUS_SEED: u64 = 42;

/// Years whose January 1 is emitted as a century-boundary case.
pub const CENTURY_CANDIDATES: [i32; 5] = [1800, 1900, 2000, 2100, 2200];

/// Day-of-year of February 29 in a leap year.
pub const LEAP_DAY_OF_YEAR: u16 = 60;

/// Why a case is in the corpus. Descriptive only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CaseLabel {
    Random,
    CenturyStart(i32),
    LeapDay(i32),
}

impl std::fmt::Display for CaseLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaseLabel::Random => write!(f, "random"),
            CaseLabel::CenturyStart(year) => write!(f, "century start: {}", year),
            CaseLabel::LeapDay(year) => write!(f, "leap Feb-29: {}", year),
        }
    }
}

/// One benchmark input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TestCase {
    pub date: CalendarDate,
    pub label: CaseLabel,
}

/// Generate the corpus with the fixed [`CORPUS_SEED`].
pub fn generate_seeded(config: &BenchConfig) -> Result<Vec<TestCase>, DateError> {
    let mut rng = ChaCha8Rng::seed_from_u64(CORPUS_SEED);
    generate(config, &mut rng)
}

/// Generate the corpus from an explicit RNG.
///
/// Random cases draw the year, then the day (`1..=365`) for each case; the day
/// is clamped down to the year's length, never rejected. Output order is
/// random cases, century starts, leap days.
///
/// Fails only if the configured year range leaves `1..=MAX_YEAR`. Run
/// [`BenchConfig::validate`] first: an empty year range panics in the RNG.
pub fn generate<R: Rng + ?Sized>(
    config: &BenchConfig,
    rng: &mut R,
) -> Result<Vec<TestCase>, DateError> {
    let mut cases = Vec::with_capacity(config.corpus_size + edge_case_count(config));

    for _ in 0..config.corpus_size {
        let year = rng.gen_range(config.year_min..=config.year_max);
        let day = rng.gen_range(1..=365u16).min(days_in_year(year));
        cases.push(TestCase {
            date: CalendarDate::new(year, day)?,
            label: CaseLabel::Random,
        });
    }

    if config.include_edge_cases {
        push_edge_cases(config, &mut cases)?;
    }

    Ok(cases)
}

fn push_edge_cases(config: &BenchConfig, cases: &mut Vec<TestCase>) -> Result<(), DateError> {
    for year in century_years(config) {
        cases.push(TestCase {
            date: CalendarDate::new(year, 1)?,
            label: CaseLabel::CenturyStart(year),
        });
    }
    for year in leap_day_years(config) {
        cases.push(TestCase {
            date: CalendarDate::new(year, LEAP_DAY_OF_YEAR)?,
            label: CaseLabel::LeapDay(year),
        });
    }
    Ok(())
}

fn century_years(config: &BenchConfig) -> impl Iterator<Item = i32> + '_ {
    CENTURY_CANDIDATES
        .into_iter()
        .filter(|year| (config.year_min..=config.year_max).contains(year))
}

// Stride starts at year_min, not at the first multiple of 4.
fn leap_day_years(config: &BenchConfig) -> impl Iterator<Item = i32> + '_ {
    std::iter::successors(Some(config.year_min), |year| year.checked_add(4))
        .take_while(|year| *year <= config.year_max)
        .filter(|year| is_leap(*year))
}

/// Number of century-start and leap-day cases [`generate`] appends for
/// `config`; 0 when edge cases are disabled.
pub fn edge_case_count(config: &BenchConfig) -> usize {
    if !config.include_edge_cases {
        return 0;
    }
    century_years(config).count() + leap_day_years(config).count()
}
