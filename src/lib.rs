//! ISO Week Bench - ISO 8601 week-number variants and their benchmark harness
//!
//! Four equivalent implementations of "date -> ISO week number", timed per call
//! and cross-checked against a reference on a reproducible corpus.
//!
//! # Modules
//!
//! - [`calendar`] - Leap-year rule, day counts, validated `CalendarDate`
//! - [`week`] - `WeekDateStrategy` and its four implementations
//! - [`corpus`] - Fixed-seed test case generation
//! - [`validator`] - Full-corpus correctness sweep
//! - [`stats`] - Latency samples and nearest-rank statistics
//! - [`harness`] - Warm-up, timed pass, suite orchestration
//! - [`memory`] - Best-effort RSS probes
//! - [`report`] - Console and CSV output
//! - [`config`] - YAML app config and the immutable run config
//! - [`logging`] - `tracing` subscriber setup

// Core math - must be first!
pub mod calendar;
pub mod week;

// Benchmark pipeline
pub mod corpus;
pub mod harness;
pub mod memory;
pub mod stats;
pub mod validator;

// Ambient
pub mod config;
pub mod logging;
pub mod report;

// Convenient re-exports at crate root
pub use calendar::{CalendarDate, DateError, MAX_YEAR, days_in_year, is_leap};
pub use config::{AppConfig, BenchConfig, ConfigError};
pub use corpus::{CORPUS_SEED, CaseLabel, TestCase};
pub use harness::{BenchmarkHarness, SuiteReport, VariantResult};
pub use memory::{MemoryProbe, MemorySnapshot, NoopProbe, ProcStatusProbe};
pub use stats::BenchmarkStatistics;
pub use validator::{CorrectnessReport, Mismatch};
pub use week::{IsoWeek, Variant, WeekDateStrategy};
