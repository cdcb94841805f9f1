//! Benchmark Harness - warm-up, timed pass, statistics, validation
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌──────────┐    ┌──────────┐    ┌──────────┐
//! │ Memory   │───▶│ Warm-up  │───▶│  Timed   │───▶│ Memory   │───▶│ Validate │
//! │ (before) │    │ 10k calls│    │   pass   │    │ (after)  │    │ (corpus) │
//! └──────────┘    └──────────┘    └──────────┘    └──────────┘    └──────────┘
//! ```
//!
//! Single-threaded; variants run one after another. The timed window holds the
//! call and its `black_box` sink: corpus indexing happens before
//! `Instant::now()`, sample storage after `elapsed()`.

use std::hint::black_box;
use std::time::Instant;

use serde::Serialize;

use crate::calendar::CalendarDate;
use crate::config::BenchConfig;
use crate::corpus::TestCase;
use crate::memory::{MemoryProbe, MemorySnapshot};
use crate::stats::{BenchmarkStatistics, LatencySamples};
use crate::validator::{self, CorrectnessReport};
use crate::week::{BitOps, EarlyReturn, Precalculated, Reference, Variant, WeekDateStrategy};

/// Discarded calls before the timed pass.
pub const WARMUP_ITERATIONS: usize = 10_000;

/// Rough allowance for the locals of one week-number call, on top of the
/// argument itself. Informational only.
const LOCALS_STACK_ALLOWANCE: usize = 64;

/// Everything measured for one variant
#[derive(Debug, Clone, Serialize)]
pub struct VariantResult {
    pub name: String,
    pub statistics: BenchmarkStatistics,
    pub correctness: CorrectnessReport,
    pub iterations: usize,
    pub memory_before: MemorySnapshot,
    pub memory_after: MemorySnapshot,
    pub stack_estimate_bytes: usize,
}

/// Results of a full run, in execution order
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub results: Vec<VariantResult>,
}

impl SuiteReport {
    /// The reference variant's result, if it was part of the run.
    pub fn reference(&self) -> Option<&VariantResult> {
        self.results
            .iter()
            .find(|r| r.name == Variant::Reference.name())
    }

    /// `reference.mean / result.mean`; 0.0 when either side is unavailable.
    pub fn speedup(&self, result: &VariantResult) -> f64 {
        match self.reference() {
            Some(reference) if result.statistics.mean_ns > 0.0 => {
                reference.statistics.mean_ns / result.statistics.mean_ns
            }
            _ => 0.0,
        }
    }

    pub fn all_correct(&self) -> bool {
        self.results.iter().all(|r| r.correctness.all_matched)
    }

    pub fn total_mismatches(&self) -> usize {
        self.results.iter().map(|r| r.correctness.mismatch_count).sum()
    }
}

pub struct BenchmarkHarness<'a> {
    config: &'a BenchConfig,
    probe: &'a dyn MemoryProbe,
}

impl<'a> BenchmarkHarness<'a> {
    pub fn new(config: &'a BenchConfig, probe: &'a dyn MemoryProbe) -> Self {
        Self { config, probe }
    }

    /// Benchmark and validate one strategy over `corpus`.
    ///
    /// `corpus` must not be empty and `config.iterations` must be non-zero;
    /// both are guaranteed by [`BenchConfig::validate`].
    pub fn run<S: WeekDateStrategy + ?Sized>(
        &self,
        strategy: &S,
        corpus: &[TestCase],
    ) -> VariantResult {
        assert!(!corpus.is_empty(), "benchmark corpus is empty");

        let name = strategy.name();
        if self.config.verbose {
            tracing::info!("Benchmarking {}...", name);
        }

        let memory_before = self.capture_memory();

        warm_up(strategy, corpus, WARMUP_ITERATIONS);
        let samples = timed_pass(strategy, corpus, self.config.iterations);

        let memory_after = self.capture_memory();

        let statistics = samples.into_statistics().unwrap_or_default();

        let correctness = validator::validate(strategy, corpus);

        if self.config.verbose {
            tracing::info!(
                "{} done: mean={:.2}ns median={:.2}ns p99={:.2}ns correctness={}",
                name,
                statistics.mean_ns,
                statistics.median_ns,
                statistics.p99_ns,
                if correctness.all_matched { "PASS" } else { "FAIL" }
            );
        }

        VariantResult {
            name: name.to_string(),
            statistics,
            correctness,
            iterations: self.config.iterations,
            memory_before,
            memory_after,
            stack_estimate_bytes: std::mem::size_of::<CalendarDate>() + LOCALS_STACK_ALLOWANCE,
        }
    }

    /// Run a [`Variant`] through its concrete type so the timed call is
    /// statically dispatched.
    pub fn run_variant(&self, variant: Variant, corpus: &[TestCase]) -> VariantResult {
        match variant {
            Variant::Reference => self.run(&Reference, corpus),
            Variant::EarlyReturn => self.run(&EarlyReturn, corpus),
            Variant::BitOps => self.run(&BitOps, corpus),
            Variant::Precalculated => self.run(&Precalculated, corpus),
        }
    }

    /// Run every configured variant, in configuration order.
    pub fn run_suite(&self, corpus: &[TestCase]) -> SuiteReport {
        let results = self
            .config
            .variants
            .iter()
            .map(|&variant| self.run_variant(variant, corpus))
            .collect();
        SuiteReport { results }
    }

    fn capture_memory(&self) -> MemorySnapshot {
        if self.config.track_memory {
            self.probe.capture()
        } else {
            MemorySnapshot::default()
        }
    }
}

fn warm_up<S: WeekDateStrategy + ?Sized>(strategy: &S, corpus: &[TestCase], calls: usize) {
    for i in 0..calls {
        let date = corpus[i % corpus.len()].date;
        black_box(strategy.week_number(black_box(date)));
    }
}

fn timed_pass<S: WeekDateStrategy + ?Sized>(
    strategy: &S,
    corpus: &[TestCase],
    iterations: usize,
) -> LatencySamples {
    let mut samples = LatencySamples::with_capacity(iterations);

    for i in 0..iterations {
        let date = black_box(corpus[i % corpus.len()].date);

        let start = Instant::now();
        black_box(strategy.week_number(date));
        let elapsed = start.elapsed();

        samples.record(elapsed.as_nanos() as f64);
    }

    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{CaseLabel, generate_seeded};
    use crate::memory::NoopProbe;
    use std::cell::Cell;

    fn small_config(iterations: usize) -> BenchConfig {
        BenchConfig {
            corpus_size: 200,
            iterations,
            year_min: 1800,
            year_max: 2200,
            verbose: false,
            track_memory: false,
            ..BenchConfig::default()
        }
    }

    /// Counts calls so the cycling contract can be checked
    struct Counting {
        calls: Cell<usize>,
    }

    impl WeekDateStrategy for Counting {
        fn name(&self) -> &'static str {
            "Counting"
        }

        fn week_number(&self, date: CalendarDate) -> u32 {
            self.calls.set(self.calls.get() + 1);
            Reference.week_number(date)
        }
    }

    /// Busy-waits inside the call so its cost is known from below
    struct Slow;

    impl WeekDateStrategy for Slow {
        fn name(&self) -> &'static str {
            "Slow"
        }

        fn week_number(&self, date: CalendarDate) -> u32 {
            let start = Instant::now();
            while start.elapsed() < std::time::Duration::from_micros(20) {
                std::hint::spin_loop();
            }
            Reference.week_number(date)
        }
    }

    struct FixedProbe(MemorySnapshot);

    impl MemoryProbe for FixedProbe {
        fn capture(&self) -> MemorySnapshot {
            self.0
        }
    }

    #[test]
    fn test_iteration_count_independent_of_corpus_size() {
        let config = small_config(1_234);
        let corpus = generate_seeded(&config).unwrap();
        assert!(corpus.len() < 1_234);

        let counting = Counting { calls: Cell::new(0) };
        let result = BenchmarkHarness::new(&config, &NoopProbe).run(&counting, &corpus);

        assert_eq!(result.statistics.sample_count, 1_234);
        assert_eq!(result.iterations, 1_234);
        // warm-up + timed pass + one full validation sweep
        assert_eq!(
            counting.calls.get(),
            WARMUP_ITERATIONS + 1_234 + corpus.len()
        );
    }

    #[test]
    fn test_timed_window_contains_the_call() {
        let corpus = vec![TestCase {
            date: CalendarDate::new(2004, 60).unwrap(),
            label: CaseLabel::LeapDay(2004),
        }];
        let stats = timed_pass(&Slow, &corpus, 5).into_statistics().unwrap();

        assert_eq!(stats.sample_count, 5);
        assert!(stats.min_ns >= 20_000.0, "min {} ns", stats.min_ns);
    }

    #[test]
    fn test_validation_covers_corpus_even_with_few_iterations() {
        let config = small_config(3);
        let corpus = generate_seeded(&config).unwrap();
        let result = BenchmarkHarness::new(&config, &NoopProbe).run(&Variant::BitOps, &corpus);

        assert_eq!(result.statistics.sample_count, 3);
        assert!(result.correctness.all_matched);
    }

    #[test]
    fn test_suite_runs_all_variants_in_order() {
        let config = small_config(500);
        let corpus = generate_seeded(&config).unwrap();
        let suite = BenchmarkHarness::new(&config, &NoopProbe).run_suite(&corpus);

        let names: Vec<&str> = suite.results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Original", "V1_EarlyReturn", "V2_BitOps", "V4_Precalculation"]
        );
        assert!(suite.all_correct());
        assert_eq!(suite.total_mismatches(), 0);

        for r in &suite.results {
            let s = &r.statistics;
            assert!(s.min_ns <= s.median_ns && s.median_ns <= s.max_ns);
            assert!(s.min_ns <= s.mean_ns && s.mean_ns <= s.max_ns);
            assert!(s.p95_ns <= s.p99_ns);
        }
    }

    #[test]
    fn test_memory_tracking_flag() {
        let snapshot = MemorySnapshot {
            current_rss_kb: 100,
            peak_rss_kb: 200,
        };
        let probe = FixedProbe(snapshot);
        let corpus = vec![TestCase {
            date: CalendarDate::new(2004, 60).unwrap(),
            label: CaseLabel::LeapDay(2004),
        }];

        let mut config = small_config(10);
        config.track_memory = true;
        let tracked = BenchmarkHarness::new(&config, &probe).run(&Reference, &corpus);
        assert_eq!(tracked.memory_before, snapshot);
        assert_eq!(tracked.memory_after, snapshot);

        config.track_memory = false;
        let untracked = BenchmarkHarness::new(&config, &probe).run(&Reference, &corpus);
        assert_eq!(untracked.memory_before, MemorySnapshot::default());
        assert_eq!(untracked.memory_after, MemorySnapshot::default());
    }

    fn result_with_mean(name: &str, mean_ns: f64) -> VariantResult {
        VariantResult {
            name: name.to_string(),
            statistics: BenchmarkStatistics {
                mean_ns,
                min_ns: mean_ns,
                max_ns: mean_ns,
                median_ns: mean_ns,
                p95_ns: mean_ns,
                p99_ns: mean_ns,
                sample_count: 1,
            },
            correctness: CorrectnessReport::default(),
            iterations: 1,
            memory_before: MemorySnapshot::default(),
            memory_after: MemorySnapshot::default(),
            stack_estimate_bytes: 0,
        }
    }

    #[test]
    fn test_speedup_relative_to_reference() {
        let suite = SuiteReport {
            results: vec![
                result_with_mean("Original", 20.0),
                result_with_mean("V2_BitOps", 10.0),
                result_with_mean("V4_Precalculation", 0.0),
            ],
        };
        assert!((suite.speedup(&suite.results[0]) - 1.0).abs() < 1e-12);
        assert!((suite.speedup(&suite.results[1]) - 2.0).abs() < 1e-12);
        assert_eq!(suite.speedup(&suite.results[2]), 0.0);

        let no_reference = SuiteReport {
            results: vec![result_with_mean("V2_BitOps", 10.0)],
        };
        assert_eq!(no_reference.speedup(&no_reference.results[0]), 0.0);
    }
}
