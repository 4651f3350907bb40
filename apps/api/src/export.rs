//! Flat CSV rendering of a match run.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::Match;
use crate::session::{MatchMode, MatchRun};

pub const BEST_HEADER: &str = "ResumeID,BestJobID,Score,MatchedSkills";
pub const PAIRWISE_HEADER: &str = "JobID,ResumeID,Score,MatchedSkills";

/// Renders the run with the header matching its mode; scores to 2 decimals.
pub fn render_csv(run: &MatchRun) -> String {
    let header = match run.mode {
        MatchMode::Best => BEST_HEADER,
        MatchMode::All => PAIRWISE_HEADER,
    };
    let mut out = String::with_capacity(header.len() + run.matches.len() * 24);
    out.push_str(header);
    out.push('\n');
    for m in &run.matches {
        write_row(&mut out, run.mode, m);
    }
    out
}

fn write_row(out: &mut String, mode: MatchMode, m: &Match) {
    // Writing into a String cannot fail.
    let _ = match mode {
        MatchMode::Best => writeln!(
            out,
            "{},{},{:.2},{}",
            m.resume_id, m.job_id, m.score, m.matched_skill_count
        ),
        MatchMode::All => writeln!(
            out,
            "{},{},{:.2},{}",
            m.job_id, m.resume_id, m.score, m.matched_skill_count
        ),
    };
}

pub async fn write_export(path: &Path, contents: &str) -> Result<()> {
    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("Failed to write match export to {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = contents.len(), "Match export written");
    Ok(())
}
