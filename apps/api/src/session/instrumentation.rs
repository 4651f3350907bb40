use std::fmt;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::collection::BackendKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Load,
    Search,
    Sort,
    Match,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Load => "load",
            Phase::Search => "search",
            Phase::Sort => "sort",
            Phase::Match => "match",
        };
        f.write_str(name)
    }
}

/// Wall-clock stopwatch for one phase.
pub struct PhaseTimer {
    phase: Phase,
    started: Instant,
}

impl PhaseTimer {
    pub fn start(phase: Phase) -> Self {
        Self {
            phase,
            started: Instant::now(),
        }
    }

    pub fn stop(self) -> PhaseTiming {
        let elapsed_us = u64::try_from(self.started.elapsed().as_micros()).unwrap_or(u64::MAX);
        tracing::debug!(phase = %self.phase, elapsed_us, "phase finished");
        PhaseTiming {
            phase: self.phase,
            elapsed_us,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseTiming {
    pub phase: Phase,
    pub elapsed_us: u64,
}

/// Observational counters for one session. Nothing reads these back into
/// matching decisions.
#[derive(Debug, Clone, Serialize)]
pub struct SessionMetrics {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub backend: BackendKind,
    /// Accumulated across every load call.
    pub load_us: u64,
    pub search_us: u64,
    pub sort_us: u64,
    pub match_us: u64,
    pub job_count: usize,
    pub resume_count: usize,
    /// Pairs scored by the last match run.
    pub comparisons: usize,
}

impl SessionMetrics {
    pub fn new(run_id: Uuid, started_at: DateTime<Utc>, backend: BackendKind) -> Self {
        Self {
            run_id,
            started_at,
            backend,
            load_us: 0,
            search_us: 0,
            sort_us: 0,
            match_us: 0,
            job_count: 0,
            resume_count: 0,
            comparisons: 0,
        }
    }

    pub fn record(&mut self, timing: PhaseTiming) {
        match timing.phase {
            Phase::Load => self.load_us = self.load_us.saturating_add(timing.elapsed_us),
            Phase::Search => self.search_us = timing.elapsed_us,
            Phase::Sort => self.sort_us = timing.elapsed_us,
            Phase::Match => self.match_us = timing.elapsed_us,
        }
    }
}
