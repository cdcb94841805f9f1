//! Result Reporter - console summary and CSV export
//!
//! Renders a [`SuiteReport`]; computes nothing beyond the speedup ratio the
//! suite already exposes.

use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::harness::{SuiteReport, VariantResult};

pub const CSV_HEADER: &str = "variant,mean_ns,median_ns,min_ns,max_ns,p95_ns,p99_ns,speedup,\
stack_bytes,rss_before_kb,rss_after_kb,peak_rss_kb,iterations,correctness,mismatches";

fn pass_fail(result: &VariantResult) -> &'static str {
    if result.correctness.all_matched {
        "PASS"
    } else {
        "FAIL"
    }
}

/// One CSV row (no trailing newline).
pub fn csv_row(suite: &SuiteReport, r: &VariantResult) -> String {
    let s = &r.statistics;
    format!(
        "{},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{},{},{},{},{},{},{}",
        r.name,
        s.mean_ns,
        s.median_ns,
        s.min_ns,
        s.max_ns,
        s.p95_ns,
        s.p99_ns,
        suite.speedup(r),
        r.stack_estimate_bytes,
        r.memory_before.current_rss_kb,
        r.memory_after.current_rss_kb,
        r.memory_after.peak_rss_kb,
        r.iterations,
        pass_fail(r),
        r.correctness.mismatch_count
    )
}

/// Write the CSV to any writer: header plus one row per variant.
pub fn write_csv<W: Write>(suite: &SuiteReport, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "{}", CSV_HEADER)?;
    for r in &suite.results {
        writeln!(out, "{}", csv_row(suite, r))?;
    }
    Ok(())
}

/// Write the CSV file at `path`, creating parent directories as needed.
/// Overwrites any previous run's output.
pub fn save_csv(suite: &SuiteReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_csv(suite, &mut writer)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;
    Ok(())
}

/// Human-readable per-variant blocks. `verbose` adds the retained mismatch
/// detail under each failing variant.
pub fn render_console(suite: &SuiteReport, verbose: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n=== PERFORMANCE RESULTS ===");

    for r in &suite.results {
        let s = &r.statistics;
        let _ = writeln!(out, "\n{}:", r.name);
        let _ = writeln!(out, "  Latency:");
        let _ = writeln!(out, "    Avg:     {:.2} ns", s.mean_ns);
        let _ = writeln!(out, "    Median:  {:.2} ns", s.median_ns);
        let _ = writeln!(out, "    Min:     {:.2} ns", s.min_ns);
        let _ = writeln!(out, "    Max:     {:.2} ns", s.max_ns);
        let _ = writeln!(out, "    P95:     {:.2} ns", s.p95_ns);
        let _ = writeln!(out, "    P99:     {:.2} ns", s.p99_ns);
        let _ = writeln!(out, "    Speedup: {:.2}x", suite.speedup(r));

        let _ = writeln!(out, "  Memory:");
        let _ = writeln!(out, "    Stack:      ~{} bytes", r.stack_estimate_bytes);
        if r.memory_before.is_known() || r.memory_after.is_known() {
            let _ = writeln!(out, "    RSS before: {} KB", r.memory_before.current_rss_kb);
            let _ = writeln!(out, "    RSS after:  {} KB", r.memory_after.current_rss_kb);
            let _ = writeln!(out, "    Peak RSS:   {} KB", r.memory_after.peak_rss_kb);
        } else {
            let _ = writeln!(out, "    RSS:        unknown");
        }

        let _ = write!(out, "  Correctness: {}", pass_fail(r));
        if !r.correctness.all_matched {
            let _ = write!(out, " ({} mismatches)", r.correctness.mismatch_count);
        }
        let _ = writeln!(out);

        if verbose {
            for m in &r.correctness.first_mismatches {
                let _ = writeln!(
                    out,
                    "    MISMATCH: {} year={} day={} Original={} {}={}",
                    m.case.label,
                    m.case.date.year(),
                    m.case.date.day_of_year(),
                    m.reference,
                    r.name,
                    m.variant
                );
            }
        }
    }

    out
}
