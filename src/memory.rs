//! Memory Probe - best-effort resident set size readings
//!
//! Purely informational. A probe that cannot read anything returns a zeroed
//! [`MemorySnapshot`]; it never fails the run.

use serde::Serialize;
use std::fs;

/// RSS reading in KiB. All-zero means "unknown".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MemorySnapshot {
    pub current_rss_kb: u64,
    pub peak_rss_kb: u64,
}

impl MemorySnapshot {
    pub fn is_known(&self) -> bool {
        self.current_rss_kb != 0 || self.peak_rss_kb != 0
    }
}

/// Source of process memory readings.
pub trait MemoryProbe {
    fn capture(&self) -> MemorySnapshot;
}

/// Probe for platforms without a supported source.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProbe;

impl MemoryProbe for NoopProbe {
    fn capture(&self) -> MemorySnapshot {
        MemorySnapshot::default()
    }
}

/// Reads `VmRSS` (current) and `VmHWM` (peak) from `/proc/self/status`.
#[derive(Debug, Clone)]
pub struct ProcStatusProbe {
    path: String,
}

impl Default for ProcStatusProbe {
    fn default() -> Self {
        Self {
            path: "/proc/self/status".to_string(),
        }
    }
}

impl ProcStatusProbe {
    /// Probe reading an arbitrary status-format file.
    pub fn with_path(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl MemoryProbe for ProcStatusProbe {
    fn capture(&self) -> MemorySnapshot {
        match fs::read_to_string(&self.path) {
            Ok(status) => parse_proc_status(&status),
            Err(e) => {
                tracing::debug!("memory probe unavailable ({}): {}", self.path, e);
                MemorySnapshot::default()
            }
        }
    }
}

/// Parse the `VmRSS:` / `VmHWM:` lines of a `/proc/<pid>/status` dump.
/// Missing or malformed lines read as zero.
pub fn parse_proc_status(status: &str) -> MemorySnapshot {
    let mut snapshot = MemorySnapshot::default();
    for line in status.lines() {
        if let Some(rest) = line.strip_prefix("VmRSS:") {
            snapshot.current_rss_kb = parse_kb(rest);
        } else if let Some(rest) = line.strip_prefix("VmHWM:") {
            snapshot.peak_rss_kb = parse_kb(rest);
        }
    }
    snapshot
}

fn parse_kb(field: &str) -> u64 {
    field
        .split_whitespace()
        .next()
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

/// The best probe available on this platform.
pub fn default_probe() -> Box<dyn MemoryProbe> {
    if cfg!(target_os = "linux") {
        Box::new(ProcStatusProbe::default())
    } else {
        Box::new(NoopProbe)
    }
}
