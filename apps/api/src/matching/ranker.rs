//! Ranking over scored pairs. Everything here is a pure function of its
//! inputs; collections are only read.

use crate::matching::engine::MatchScorer;
use crate::models::{Job, Match, Resume};

/// Default list length for the per-record ranking views.
pub const DEFAULT_RANK_LIMIT: usize = 10;

/// Scores every pair, job-major then resume-minor.
pub fn all_pairs<'a, J, R>(scorer: &dyn MatchScorer, jobs: J, resumes: R) -> Vec<Match>
where
    J: IntoIterator<Item = &'a Job>,
    R: IntoIterator<Item = &'a Resume> + Copy,
{
    jobs.into_iter()
        .flat_map(|job| resumes.into_iter().map(move |resume| scorer.score(job, resume)))
        .collect()
}

/// Highest-scoring job for each resume, in resume order.
///
/// Ties keep the first job encountered in collection order. Resumes get no
/// row when there are no jobs.
pub fn best_match_per_resume<'a, J, R>(scorer: &dyn MatchScorer, jobs: J, resumes: R) -> Vec<Match>
where
    J: IntoIterator<Item = &'a Job> + Copy,
    R: IntoIterator<Item = &'a Resume>,
{
    resumes
        .into_iter()
        .filter_map(|resume| {
            jobs.into_iter()
                .map(|job| scorer.score(job, resume))
                .fold(None, |best: Option<Match>, candidate| match best {
                    Some(b) if b.score >= candidate.score => Some(b),
                    _ => Some(candidate),
                })
        })
        .collect()
}

/// The `k` highest scores, stable on ties.
pub fn top_k(matches: &[Match], k: usize) -> Vec<Match> {
    let mut ranked = matches.to_vec();
    // slice::sort_by is stable, so equal scores keep their input order.
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(k);
    ranked
}

pub fn rank_resumes_for_job<'a, R>(
    scorer: &dyn MatchScorer,
    job: &Job,
    resumes: R,
    k: usize,
) -> Vec<Match>
where
    R: IntoIterator<Item = &'a Resume>,
{
    let scored: Vec<Match> = resumes
        .into_iter()
        .map(|resume| scorer.score(job, resume))
        .collect();
    top_k(&scored, k)
}

pub fn rank_jobs_for_resume<'a, J>(
    scorer: &dyn MatchScorer,
    resume: &Resume,
    jobs: J,
    k: usize,
) -> Vec<Match>
where
    J: IntoIterator<Item = &'a Job>,
{
    let scored: Vec<Match> = jobs
        .into_iter()
        .map(|job| scorer.score(job, resume))
        .collect();
    top_k(&scored, k)
}
