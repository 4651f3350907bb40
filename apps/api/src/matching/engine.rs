//! Match scoring: skill overlap plus experience fit for one (job, resume) pair.
//!
//! Default: `WeightedScorer` with 60% skill / 40% experience.
//!
//! `AppState` holds an `Arc<dyn MatchScorer>` so rankers and handlers never
//! depend on the concrete formula.

use serde::{Deserialize, Serialize};

use crate::models::{Job, Match, Resume};

// ────────────────────────────────────────────────────────────────────────────
// Weights
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub skill: f64,
    pub experience: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skill: 0.6,
            experience: 0.4,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Scores a single pair. Implementations must be pure: the same pair always
/// yields the same `Match`.
pub trait MatchScorer: Send + Sync {
    fn score(&self, job: &Job, resume: &Resume) -> Match;
}

// ────────────────────────────────────────────────────────────────────────────
// WeightedScorer
// ────────────────────────────────────────────────────────────────────────────

/// Algorithm:
/// 1. skill = |job ∩ resume| / max(1, |job|) × 100, or 0 if either side has no skills
/// 2. experience = 100 if nothing required, else ratio based (see `experience_score`)
/// 3. score = skill × w.skill + experience × w.experience
#[derive(Debug, Clone, Default)]
pub struct WeightedScorer {
    weights: ScoringWeights,
}

impl WeightedScorer {
    pub fn weights(&self) -> ScoringWeights {
        self.weights
    }
}

impl MatchScorer for WeightedScorer {
    fn score(&self, job: &Job, resume: &Resume) -> Match {
        let matched = count_matching_skills(job, resume);
        let score = combine(
            skill_score(job, resume),
            experience_score(job.experience_required(), resume.years_experience()),
            &self.weights,
        );
        Match::new(job.id(), resume.id(), score, matched)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Formula pieces
// ────────────────────────────────────────────────────────────────────────────

/// Number of job skills the resume also lists.
pub fn count_matching_skills(job: &Job, resume: &Resume) -> usize {
    job.skills().overlap(resume.skills())
}

/// Share of the job's skills covered by the resume, 0 – 100.
pub fn skill_score(job: &Job, resume: &Resume) -> f64 {
    if job.skills().is_empty() || resume.skills().is_empty() {
        return 0.0;
    }
    let matched = count_matching_skills(job, resume) as f64;
    matched / job.skills().len().max(1) as f64 * 100.0
}

/// Experience fit.
///
/// Nothing required → 100. Meeting the requirement gives `50 + 50 × ratio`
/// (100 from ratio 2.0 on); a shortfall gives `100 × actual / required`.
/// Ratios in [1, 2) score above 100; only the combined score is clamped.
pub fn experience_score(required: u32, actual: u32) -> f64 {
    if required == 0 {
        return 100.0;
    }
    let ratio = f64::from(actual) / f64::from(required);
    if actual >= required {
        if ratio >= 2.0 {
            100.0
        } else {
            50.0 + 50.0 * ratio
        }
    } else {
        100.0 * ratio
    }
}

pub fn meets_experience_requirement(job: &Job, resume: &Resume) -> bool {
    resume.years_experience() >= job.experience_required()
}

fn combine(skill: f64, experience: f64, weights: &ScoringWeights) -> f64 {
    (skill * weights.skill + experience * weights.experience).clamp(0.0, 100.0)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
