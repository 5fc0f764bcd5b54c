//! Analysis run metrics.
//!
//! Each paragraph analysis records what every pass did: how long it took,
//! how many sentences it looked at (and had to skip because the parser
//! failed), and how many streets it created. These numbers are returned in
//! the `AnalysisReport` and printed by the CLI.

use serde::Serialize;
use std::time::{Duration, Instant};

/// Counters and timing for one pass.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct PassMetrics {
    /// Elapsed time for the pass.
    pub duration: Duration,
    /// Sentences the pass examined.
    pub sentences: usize,
    /// Sentences dropped because the dependency parser failed on them.
    pub skipped: usize,
    /// Streets appended to the scenario by this pass.
    pub streets_created: usize,
    /// Whether the pass ran at all (gated passes may not).
    pub ran: bool,
}

/// Metrics for a full `analyze_paragraph` run.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisMetrics {
    pub total: Duration,
    /// Streets created for a detected junction.
    pub junction_streets: usize,
    pub direction: PassMetrics,
    pub fallback: PassMetrics,
    pub parking: PassMetrics,
}

/// Measures one pass: elapsed time plus the street-count delta.
pub(crate) struct PassTimer {
    started: Instant,
    streets_before: usize,
}

impl PassTimer {
    pub(crate) fn start(streets_before: usize) -> Self {
        PassTimer { started: Instant::now(), streets_before }
    }

    pub(crate) fn finish(self, metrics: &mut PassMetrics, streets_after: usize) {
        metrics.ran = true;
        metrics.duration += self.started.elapsed();
        metrics.streets_created += streets_after.saturating_sub(self.streets_before);
    }
}
