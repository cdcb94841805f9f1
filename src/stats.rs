//! Latency Statistics - per-call samples and their summary
//!
//! Samples are collected unsorted during the timed pass and summarized once
//! at the end. Percentiles are nearest-rank by truncation: `s[floor(n * p)]`
//! on the ascending samples, no interpolation.

use serde::Serialize;

/// Per-call latency samples (nanoseconds) for one variant's timed pass.
///
/// Every call is recorded; there is no sub-sampling.
#[derive(Debug, Default)]
pub struct LatencySamples {
    samples: Vec<f64>,
}

impl LatencySamples {
    /// Pre-size the buffer so pushes inside the timing loop never reallocate.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn record(&mut self, latency_ns: f64) {
        self.samples.push(latency_ns);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sort and summarize, consuming the samples. `None` if nothing was recorded.
    pub fn into_statistics(mut self) -> Option<BenchmarkStatistics> {
        self.samples.sort_unstable_by(f64::total_cmp);
        BenchmarkStatistics::from_sorted(&self.samples)
    }
}

/// Summary of one variant's latency samples. All values in nanoseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BenchmarkStatistics {
    pub mean_ns: f64,
    pub min_ns: f64,
    pub max_ns: f64,
    pub median_ns: f64,
    pub p95_ns: f64,
    pub p99_ns: f64,
    pub sample_count: usize,
}

impl BenchmarkStatistics {
    /// Summarize samples that are already sorted ascending.
    pub fn from_sorted(sorted: &[f64]) -> Option<Self> {
        let n = sorted.len();
        if n == 0 {
            return None;
        }
        debug_assert!(sorted.windows(2).all(|w| w[0] <= w[1]));

        let sum: f64 = sorted.iter().sum();
        let mean = sum / n as f64;

        Some(Self {
            // Floating-point summation may land a hair outside [min, max]
            // when all samples are equal; clamp to keep the ordering exact.
            mean_ns: mean.clamp(sorted[0], sorted[n - 1]),
            min_ns: sorted[0],
            max_ns: sorted[n - 1],
            median_ns: sorted[n / 2],
            p95_ns: sorted[nearest_rank_index(n, 0.95)],
            p99_ns: sorted[nearest_rank_index(n, 0.99)],
            sample_count: n,
        })
    }

    /// Summarize samples in any order.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        let mut sorted = samples.to_vec();
        sorted.sort_unstable_by(f64::total_cmp);
        Self::from_sorted(&sorted)
    }
}

/// `floor(n * p)`, kept inside the slice for `p < 1`.
#[inline]
pub fn nearest_rank_index(n: usize, p: f64) -> usize {
    ((n as f64 * p) as usize).min(n.saturating_sub(1))
}
