use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use crate::calendar::MAX_YEAR;
use crate::corpus;
use crate::week::Variant;

/// Application config: logging settings plus the benchmark run settings.
///
/// Loaded from `config/<env>.yaml`; every field has a default so a partial
/// file is fine.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub bench: BenchConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: "./logs".to_string(),
            log_file: "iso_week_bench.log".to_string(),
            use_json: false,
            rotation: "never".to_string(),
            bench: BenchConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load `config/<env>.yaml`. A missing file yields the defaults; a file
    /// that exists but does not parse is an error.
    pub fn load(env: &str) -> Result<Self> {
        Self::load_from(&Self::path_for(env))
    }

    pub fn path_for(env: &str) -> PathBuf {
        PathBuf::from(format!("config/{}.yaml", env))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config yaml: {}", path.display()))
    }
}

/// Immutable settings for one benchmark run.
///
/// Built once (YAML + CLI overrides), validated, then passed by reference to
/// the generator, harness and validator.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BenchConfig {
    /// Number of randomly generated test cases
    pub corpus_size: usize,
    /// Timed calls per variant
    pub iterations: usize,
    pub year_min: i32,
    pub year_max: i32,
    /// Century starts and Feb 29 cases
    pub include_edge_cases: bool,
    /// Per-step progress and mismatch detail
    pub verbose: bool,
    /// RSS sampling before/after each timed pass
    pub track_memory: bool,
    /// Strategies to run, in order
    pub variants: Vec<Variant>,
    pub output_csv: String,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            corpus_size: 100_000,
            iterations: 10_000_000,
            year_min: 1800,
            year_max: 3000,
            include_edge_cases: true,
            verbose: true,
            track_memory: true,
            variants: Variant::ALL.to_vec(),
            output_csv: "benchmark_analysis.csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("year_min {0} is out of range (must be >= 1)")]
    YearMinOutOfRange(i32),

    #[error("year_max {0} is out of range (must be <= {max})", max = MAX_YEAR)]
    YearMaxOutOfRange(i32),

    #[error("year_min {min} is greater than year_max {max}")]
    InvertedYearRange { min: i32, max: i32 },

    #[error("iterations must be greater than zero")]
    ZeroIterations,

    #[error("test corpus would be empty (corpus_size = 0 and no edge cases in the year range)")]
    EmptyCorpus,

    #[error("no variants selected")]
    NoVariants,
}

impl BenchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.year_min < 1 {
            return Err(ConfigError::YearMinOutOfRange(self.year_min));
        }
        if self.year_max > MAX_YEAR {
            return Err(ConfigError::YearMaxOutOfRange(self.year_max));
        }
        if self.year_min > self.year_max {
            return Err(ConfigError::InvertedYearRange {
                min: self.year_min,
                max: self.year_max,
            });
        }
        if self.iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if self.corpus_size == 0 && corpus::edge_case_count(self) == 0 {
            return Err(ConfigError::EmptyCorpus);
        }
        if self.variants.is_empty() {
            return Err(ConfigError::NoVariants);
        }
        Ok(())
    }
}
