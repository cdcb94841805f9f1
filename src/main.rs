//! ISO Week Bench - command-line entry point
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌──────────┐    ┌──────────┐
//! │  Config  │───▶│  Corpus  │───▶│ Harness  │───▶│  Report  │
//! │(YAML+CLI)│    │ (seeded) │    │(time+chk)│    │(tty+CSV) │
//! └──────────┘    └──────────┘    └──────────┘    └──────────┘
//! ```

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use iso_week_bench::config::{AppConfig, BenchConfig};
use iso_week_bench::harness::BenchmarkHarness;
use iso_week_bench::week::Variant;
use iso_week_bench::{corpus, logging, memory, report};

#[derive(Parser, Debug)]
#[command(name = "iso_week_bench", version, about = "ISO 8601 week date conversion benchmark")]
struct Cli {
    /// Config environment: loads config/<ENV>.yaml
    #[arg(short, long, default_value = "dev", value_name = "ENV")]
    env: String,

    /// Number of random test cases
    #[arg(long, value_name = "N")]
    test_size: Option<usize>,

    /// Timed calls per variant
    #[arg(long, value_name = "N")]
    iterations: Option<usize>,

    /// Minimum year (inclusive)
    #[arg(long, value_name = "YEAR")]
    year_min: Option<i32>,

    /// Maximum year (inclusive)
    #[arg(long, value_name = "YEAR")]
    year_max: Option<i32>,

    /// Disable century and leap-day edge cases
    #[arg(long)]
    no_edge_cases: bool,

    /// Minimal output
    #[arg(long)]
    quiet: bool,

    /// Disable RSS sampling
    #[arg(long)]
    no_memory: bool,

    /// Variant to run (repeatable): reference, early-return, bit-ops, precalc
    #[arg(long = "variant", value_name = "NAME")]
    variants: Vec<Variant>,

    /// CSV output path
    #[arg(short, long, value_name = "PATH")]
    output: Option<String>,
}

impl Cli {
    /// Layer CLI flags over the YAML run config.
    fn apply(&self, mut bench: BenchConfig) -> BenchConfig {
        if let Some(n) = self.test_size {
            bench.corpus_size = n;
        }
        if let Some(n) = self.iterations {
            bench.iterations = n;
        }
        if let Some(y) = self.year_min {
            bench.year_min = y;
        }
        if let Some(y) = self.year_max {
            bench.year_max = y;
        }
        if self.no_edge_cases {
            bench.include_edge_cases = false;
        }
        if self.quiet {
            bench.verbose = false;
        }
        if self.no_memory {
            bench.track_memory = false;
        }
        if !self.variants.is_empty() {
            bench.variants = self.variants.clone();
        }
        if let Some(path) = &self.output {
            bench.output_csv = path.clone();
        }
        bench
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut app_config = AppConfig::load(&cli.env)?;
    app_config.bench = cli.apply(app_config.bench);
    let _log_guard = logging::init_logging(&app_config);

    let config_path = AppConfig::path_for(&cli.env);
    if !config_path.exists() {
        tracing::warn!(
            "Config file {} not found, using built-in defaults",
            config_path.display()
        );
    }

    let config = app_config.bench;
    config.validate().context("Invalid benchmark configuration")?;

    println!("=== ISO 8601 Week Date Conversion ===");
    println!("Build: {} ({})", env!("GIT_HASH"), env!("BUILD_PROFILE"));
    if env!("BUILD_PROFILE") == "debug" {
        tracing::warn!("Debug build: timings are not representative, use --release");
    }
    println!("Configuration:");
    println!("  Test corpus size: {}", config.corpus_size);
    println!("  Iterations:       {}", config.iterations);
    println!("  Year range:       {}-{}", config.year_min, config.year_max);
    println!(
        "  Variants:         {}",
        config
            .variants
            .iter()
            .map(|v| v.name())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!();

    tracing::info!("Generating test data (seed {})...", corpus::CORPUS_SEED);
    let t = Instant::now();
    let cases = corpus::generate_seeded(&config).context("Failed to generate test corpus")?;
    anyhow::ensure!(
        !cases.is_empty(),
        "Test corpus is empty: no random cases and no edge cases in {}-{}",
        config.year_min,
        config.year_max
    );
    tracing::info!("Generated {} test cases in {:?}", cases.len(), t.elapsed());

    tracing::info!("Running benchmarks...");
    let probe = memory::default_probe();
    let harness = BenchmarkHarness::new(&config, probe.as_ref());
    let suite = harness.run_suite(&cases);

    print!("{}", report::render_console(&suite, config.verbose));

    println!("\nWriting results to {}...", config.output_csv);
    report::save_csv(&suite, Path::new(&config.output_csv))?;

    if !suite.all_correct() {
        tracing::warn!(
            "{} mismatches against the reference across all variants",
            suite.total_mismatches()
        );
    }

    println!("\nDone!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_yaml() {
        let cli = Cli::parse_from([
            "iso_week_bench",
            "--test-size",
            "10",
            "--iterations",
            "20",
            "--year-min",
            "1900",
            "--year-max",
            "2000",
            "--no-edge-cases",
            "--quiet",
            "--no-memory",
            "--variant",
            "v1",
            "--variant",
            "precalc",
            "-o",
            "out.csv",
        ]);
        let bench = cli.apply(BenchConfig::default());
        assert_eq!(bench.corpus_size, 10);
        assert_eq!(bench.iterations, 20);
        assert_eq!((bench.year_min, bench.year_max), (1900, 2000));
        assert!(!bench.include_edge_cases);
        assert!(!bench.verbose);
        assert!(!bench.track_memory);
        assert_eq!(
            bench.variants,
            vec![Variant::EarlyReturn, Variant::Precalculated]
        );
        assert_eq!(bench.output_csv, "out.csv");
    }

    #[test]
    fn test_no_flags_keep_yaml() {
        let cli = Cli::parse_from(["iso_week_bench"]);
        assert_eq!(cli.apply(BenchConfig::default()), BenchConfig::default());
    }

    #[test]
    fn test_unknown_variant_rejected() {
        assert!(Cli::try_parse_from(["iso_week_bench", "--variant", "v3"]).is_err());
    }
}
