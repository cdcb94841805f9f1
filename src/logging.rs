//! Logging - `tracing` subscriber setup
//!
//! The file layer always records everything the filter lets through. The
//! console layer follows `bench.verbose`: in quiet mode only warnings (such as
//! correctness mismatches) reach the terminal, so the report stays readable.

use crate::config::AppConfig;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

/// Install the global subscriber. Keep the returned guard alive for the whole
/// run or buffered file output is lost on exit.
pub fn init_logging(config: &AppConfig) -> WorkerGuard {
    let file_appender = match config.rotation.as_str() {
        "hourly" => tracing_appender::rolling::hourly(&config.log_dir, &config.log_file),
        "daily" => tracing_appender::rolling::daily(&config.log_dir, &config.log_file),
        _ => tracing_appender::rolling::never(&config.log_dir, &config.log_file),
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    let console_level = console_level(config.bench.verbose);

    if config.use_json {
        // Structured file output; console keeps human-readable warnings only
        let file_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_writer(non_blocking)
            .with_ansi(false);
        let stdout_layer = fmt::layer()
            .with_target(false)
            .with_ansi(true)
            .with_filter(LevelFilter::WARN);
        registry.with(file_layer).with(stdout_layer).init();
    } else {
        let file_layer = fmt::layer()
            .with_target(false)
            .with_writer(non_blocking)
            .with_ansi(false);
        let stdout_layer = fmt::layer()
            .with_target(false)
            .with_ansi(true)
            .with_filter(console_level);
        registry.with(file_layer).with(stdout_layer).init();
    }

    guard
}

fn console_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::TRACE
    } else {
        LevelFilter::WARN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_level_follows_verbosity() {
        assert_eq!(console_level(true), LevelFilter::TRACE);
        assert_eq!(console_level(false), LevelFilter::WARN);
    }
}
