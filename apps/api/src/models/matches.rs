use serde::{Deserialize, Serialize};

/// Score of one (job, resume) pair. Produced by a scorer, never edited.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub job_id: u32,
    pub resume_id: u32,
    /// 0 – 100
    pub score: f64,
    pub matched_skill_count: usize,
}

impl Match {
    pub fn new(job_id: u32, resume_id: u32, score: f64, matched_skill_count: usize) -> Self {
        Self {
            job_id,
            resume_id,
            score,
            matched_skill_count,
        }
    }
}
