//! Correctness Validator - full-corpus comparison against the reference
//!
//! Always sweeps every test case exactly once, whatever the timing iteration
//! count. Mismatches are recorded as data, never raised as errors.
//!
//! Per-case detail is logged at `info`; the per-variant summary at `warn`.
//! Console rendering of the retained cases is left to the report.

use serde::Serialize;

use crate::corpus::TestCase;
use crate::week::{Reference, WeekDateStrategy};

/// Mismatches kept in full detail per variant; the rest are only counted.
pub const MISMATCH_DETAIL_LIMIT: usize = 5;

/// A case where a variant disagreed with the reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    pub case: TestCase,
    pub reference: u32,
    pub variant: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorrectnessReport {
    pub all_matched: bool,
    pub mismatch_count: usize,
    /// First [`MISMATCH_DETAIL_LIMIT`] mismatches, in corpus order
    pub first_mismatches: Vec<Mismatch>,
}

impl Default for CorrectnessReport {
    fn default() -> Self {
        Self {
            all_matched: true,
            mismatch_count: 0,
            first_mismatches: Vec::new(),
        }
    }
}

impl CorrectnessReport {
    fn record(&mut self, mismatch: Mismatch) {
        self.all_matched = false;
        self.mismatch_count += 1;
        if self.first_mismatches.len() < MISMATCH_DETAIL_LIMIT {
            self.first_mismatches.push(mismatch);
        }
    }
}

/// Compare `strategy` with [`Reference`] on every case of `corpus`.
pub fn validate<S: WeekDateStrategy + ?Sized>(
    strategy: &S,
    corpus: &[TestCase],
) -> CorrectnessReport {
    let mut report = CorrectnessReport::default();

    for case in corpus {
        let expected = Reference.week_number(case.date);
        let actual = strategy.week_number(case.date);
        if expected != actual {
            if report.first_mismatches.len() < MISMATCH_DETAIL_LIMIT {
                tracing::info!(
                    "MISMATCH {}: {} year={} day={} Original={} {}={}",
                    strategy.name(),
                    case.label,
                    case.date.year(),
                    case.date.day_of_year(),
                    expected,
                    strategy.name(),
                    actual
                );
            }
            report.record(Mismatch {
                case: *case,
                reference: expected,
                variant: actual,
            });
        }
    }

    if !report.all_matched {
        tracing::warn!(
            "{}: {} of {} cases disagree with reference",
            strategy.name(),
            report.mismatch_count,
            corpus.len()
        );
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarDate;
    use crate::corpus::CaseLabel;
    use crate::week::Variant;

    /// Off by one on every date in a leap year
    struct BrokenOnLeapYears;

    impl WeekDateStrategy for BrokenOnLeapYears {
        fn name(&self) -> &'static str {
            "Broken"
        }

        fn week_number(&self, date: CalendarDate) -> u32 {
            let w = Reference.week_number(date);
            if date.is_leap_year() { w % 53 + 1 } else { w }
        }
    }

    fn corpus(years: std::ops::RangeInclusive<i32>) -> Vec<TestCase> {
        years
            .map(|y| TestCase {
                date: CalendarDate::new(y, 100).unwrap(),
                label: CaseLabel::Random,
            })
            .collect()
    }

    #[test]
    fn test_all_variants_pass() {
        let corpus = corpus(1800..=2200);
        for v in Variant::ALL {
            let report = validate(&v, &corpus);
            assert!(report.all_matched, "{} should match", v);
            assert_eq!(report.mismatch_count, 0);
            assert!(report.first_mismatches.is_empty());
        }
    }

    #[test]
    fn test_counts_every_mismatch_keeps_first_few() {
        // 2000..=2039 holds 10 leap years
        let corpus = corpus(2000..=2039);
        let report = validate(&BrokenOnLeapYears, &corpus);

        assert!(!report.all_matched);
        assert_eq!(report.mismatch_count, 10);
        assert_eq!(report.first_mismatches.len(), MISMATCH_DETAIL_LIMIT);

        let years: Vec<i32> = report
            .first_mismatches
            .iter()
            .map(|m| m.case.date.year())
            .collect();
        assert_eq!(years, vec![2000, 2004, 2008, 2012, 2016]);
        for m in &report.first_mismatches {
            assert_ne!(m.reference, m.variant);
        }
    }

    #[test]
    fn test_empty_corpus_matches() {
        let report = validate(&Variant::BitOps, &[]);
        assert_eq!(report, CorrectnessReport::default());
    }

    #[test]
    fn test_dyn_strategy() {
        let s: &dyn WeekDateStrategy = &BrokenOnLeapYears;
        let report = validate(s, &corpus(2001..=2003));
        assert!(report.all_matched);
    }
}
