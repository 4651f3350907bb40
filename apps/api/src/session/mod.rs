//! Match session: the per-run context that owns both collections, the id
//! counters, the last match run and its metrics.
//!
//! Every operation here is synchronous and runs to completion. The HTTP layer
//! serializes access through a single mutex.

pub mod handlers;
pub mod instrumentation;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::collection::{BackendKind, Collection, CollectionError, OrderedCollection};
use crate::config::Config;
use crate::extraction::SkillExtractor;
use crate::matching::ranker;
use crate::matching::{MatchBreakdown, MatchScorer};
use crate::models::job::{infer_title, DEFAULT_COMPANY, DEFAULT_EXPERIENCE_REQUIRED};
use crate::models::resume::{placeholder_email, placeholder_name, DEFAULT_YEARS_EXPERIENCE};
use crate::models::{Job, JobUpdate, Match, NewJob, NewResume, Resume, ResumeUpdate};

pub use instrumentation::{Phase, PhaseTimer, SessionMetrics};

pub const FIRST_JOB_ID: u32 = 1;
pub const FIRST_RESUME_ID: u32 = 101;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Collection(#[from] CollectionError),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("input source unavailable: {0}")]
    SourceUnavailable(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Operation vocabulary
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Job,
    Resume,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Id,
    Experience,
    /// Jobs only.
    Title,
    /// Resumes only.
    Name,
}

/// Where a single inserted record lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    #[default]
    End,
    Front,
    At(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Every (job, resume) pair.
    All,
    /// Highest-scoring job per resume.
    #[default]
    Best,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchRun {
    pub mode: MatchMode,
    pub completed_at: DateTime<Utc>,
    pub matches: Vec<Match>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub loaded: usize,
    pub rejected: usize,
    /// Collection size after the load.
    pub total: usize,
    pub elapsed_us: u64,
}

/// A record found by `find`, whichever kind it is.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum FoundRecord<'a> {
    Job(&'a Job),
    Resume(&'a Resume),
}

// ────────────────────────────────────────────────────────────────────────────
// Settings
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub backend: BackendKind,
    pub job_capacity: usize,
    pub resume_capacity: usize,
    pub job_skill_cap: usize,
    pub resume_skill_cap: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings::from(&Config::default())
    }
}

impl From<&Config> for SessionSettings {
    fn from(config: &Config) -> Self {
        Self {
            backend: config.backend,
            job_capacity: config.job_capacity,
            resume_capacity: config.resume_capacity,
            job_skill_cap: config.job_skill_cap,
            resume_skill_cap: config.resume_skill_cap,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Session
// ────────────────────────────────────────────────────────────────────────────

pub struct MatchSession {
    settings: SessionSettings,
    extractor: SkillExtractor,
    jobs: Collection<Job>,
    resumes: Collection<Resume>,
    next_job_id: u32,
    next_resume_id: u32,
    last_run: Option<MatchRun>,
    metrics: SessionMetrics,
}

impl MatchSession {
    pub fn new(settings: SessionSettings) -> Self {
        Self::with_extractor(settings, SkillExtractor::default())
    }

    pub fn with_extractor(settings: SessionSettings, extractor: SkillExtractor) -> Self {
        let jobs = Collection::new(settings.backend, settings.job_capacity);
        let metrics = SessionMetrics::new(Uuid::new_v4(), Utc::now(), jobs.kind());
        tracing::debug!(
            run_id = %metrics.run_id,
            backend = %settings.backend,
            dictionary = extractor.dictionary().len(),
            "Match session created"
        );
        Self {
            settings,
            extractor,
            jobs,
            resumes: Collection::new(settings.backend, settings.resume_capacity),
            next_job_id: FIRST_JOB_ID,
            next_resume_id: FIRST_RESUME_ID,
            last_run: None,
            metrics,
        }
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn jobs(&self) -> &Collection<Job> {
        &self.jobs
    }

    pub fn resumes(&self) -> &Collection<Resume> {
        &self.resumes
    }

    pub fn last_run(&self) -> Option<&MatchRun> {
        self.last_run.as_ref()
    }

    pub fn metrics(&self) -> &SessionMetrics {
        &self.metrics
    }

    // ── Loading ────────────────────────────────────────────────────────────

    /// Appends every record in input order. Records rejected for capacity are
    /// counted and skipped; the load carries on.
    pub fn load_jobs<I>(&mut self, records: I) -> LoadSummary
    where
        I: IntoIterator<Item = NewJob>,
    {
        let timer = PhaseTimer::start(Phase::Load);
        let (mut loaded, mut rejected) = (0, 0);
        for record in records {
            match self.insert_job(record, Placement::End) {
                Ok(_) => loaded += 1,
                Err(e) => {
                    tracing::warn!("Job rejected during load: {e}");
                    rejected += 1;
                }
            }
        }
        let timing = timer.stop();
        self.metrics.record(timing);
        tracing::info!(loaded, rejected, total = self.jobs.len(), "Jobs loaded");
        LoadSummary {
            loaded,
            rejected,
            total: self.jobs.len(),
            elapsed_us: timing.elapsed_us,
        }
    }

    pub fn load_resumes<I>(&mut self, records: I) -> LoadSummary
    where
        I: IntoIterator<Item = NewResume>,
    {
        let timer = PhaseTimer::start(Phase::Load);
        let (mut loaded, mut rejected) = (0, 0);
        for record in records {
            match self.insert_resume(record, Placement::End) {
                Ok(_) => loaded += 1,
                Err(e) => {
                    tracing::warn!("Resume rejected during load: {e}");
                    rejected += 1;
                }
            }
        }
        let timing = timer.stop();
        self.metrics.record(timing);
        tracing::info!(loaded, rejected, total = self.resumes.len(), "Resumes loaded");
        LoadSummary {
            loaded,
            rejected,
            total: self.resumes.len(),
            elapsed_us: timing.elapsed_us,
        }
    }

    /// Builds a job from raw input, fills its skills and places it.
    /// Explicit tags win over extraction. The id is consumed only when the
    /// insert succeeds.
    pub fn insert_job(&mut self, record: NewJob, placement: Placement) -> Result<Job, SessionError> {
        let id = self.next_job_id;
        let title = record
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| infer_title(&record.description));
        let mut job = Job::new(
            id,
            title,
            record.company.unwrap_or_else(|| DEFAULT_COMPANY.to_string()),
            record.description,
            record.experience_required.unwrap_or(DEFAULT_EXPERIENCE_REQUIRED),
            self.settings.job_skill_cap,
        );
        match record.skills {
            Some(tags) => {
                let added = job.add_skills(&tags);
                if added < tags.len() {
                    tracing::debug!(
                        id,
                        offered = tags.len(),
                        added,
                        cap = job.skills().cap(),
                        "Explicit job skills deduplicated or trimmed to cap"
                    );
                }
            }
            None => {
                job.extract_skills(&self.extractor);
            }
        }

        let snapshot = job.clone();
        place(&mut self.jobs, job, placement)?;
        self.next_job_id += 1;
        self.metrics.job_count = self.jobs.len();
        Ok(snapshot)
    }

    pub fn insert_resume(
        &mut self,
        record: NewResume,
        placement: Placement,
    ) -> Result<Resume, SessionError> {
        let id = self.next_resume_id;
        let mut resume = Resume::new(
            id,
            record.name.unwrap_or_else(|| placeholder_name(id)),
            record.email.unwrap_or_else(|| placeholder_email(id)),
            record.summary,
            record.years_experience.unwrap_or(DEFAULT_YEARS_EXPERIENCE),
            self.settings.resume_skill_cap,
        );
        match record.skills {
            Some(tags) => {
                let added = resume.add_skills(&tags);
                if added < tags.len() {
                    tracing::debug!(
                        id,
                        offered = tags.len(),
                        added,
                        cap = resume.skills().cap(),
                        "Explicit resume skills deduplicated or trimmed to cap"
                    );
                }
            }
            None => {
                resume.extract_skills(&self.extractor);
            }
        }

        let snapshot = resume.clone();
        place(&mut self.resumes, resume, placement)?;
        self.next_resume_id += 1;
        self.metrics.resume_count = self.resumes.len();
        Ok(snapshot)
    }

    // ── Search ─────────────────────────────────────────────────────────────

    pub fn find_job(&mut self, id: u32) -> Option<&Job> {
        let timer = PhaseTimer::start(Phase::Search);
        let found = self.jobs.find_by_id(id);
        self.metrics.record(timer.stop());
        found
    }

    pub fn find_resume(&mut self, id: u32) -> Option<&Resume> {
        let timer = PhaseTimer::start(Phase::Search);
        let found = self.resumes.find_by_id(id);
        self.metrics.record(timer.stop());
        found
    }

    pub fn find(&mut self, kind: RecordKind, id: u32) -> Option<FoundRecord<'_>> {
        match kind {
            RecordKind::Job => self.find_job(id).map(FoundRecord::Job),
            RecordKind::Resume => self.find_resume(id).map(FoundRecord::Resume),
        }
    }

    // ── Edit flows ─────────────────────────────────────────────────────────

    pub fn remove(&mut self, kind: RecordKind, id: u32) -> bool {
        let removed = match kind {
            RecordKind::Job => self.jobs.remove_by_id(id),
            RecordKind::Resume => self.resumes.remove_by_id(id),
        };
        self.metrics.job_count = self.jobs.len();
        self.metrics.resume_count = self.resumes.len();
        removed
    }

    /// Applies the update in place. Skills stay as extracted at load time.
    pub fn update_job(&mut self, id: u32, update: JobUpdate) -> Option<&Job> {
        let job = self.jobs.find_by_id_mut(id)?;
        job.apply(update);
        Some(&*job)
    }

    pub fn update_resume(&mut self, id: u32, update: ResumeUpdate) -> Option<&Resume> {
        let resume = self.resumes.find_by_id_mut(id)?;
        resume.apply(update);
        Some(&*resume)
    }

    /// Stable reorder of one collection. Does not touch the last match run.
    pub fn sort(&mut self, kind: RecordKind, key: SortKey, ascending: bool) -> Result<(), SessionError> {
        let timer = PhaseTimer::start(Phase::Sort);
        match (kind, key) {
            (RecordKind::Job, SortKey::Id) => self.jobs.sort_by(|j| j.id(), ascending),
            (RecordKind::Job, SortKey::Experience) => {
                self.jobs.sort_by(|j| j.experience_required(), ascending)
            }
            (RecordKind::Job, SortKey::Title) => {
                self.jobs.sort_by(|j| j.title().to_string(), ascending)
            }
            (RecordKind::Resume, SortKey::Id) => self.resumes.sort_by(|r| r.id(), ascending),
            (RecordKind::Resume, SortKey::Experience) => {
                self.resumes.sort_by(|r| r.years_experience(), ascending)
            }
            (RecordKind::Resume, SortKey::Name) => {
                self.resumes.sort_by(|r| r.name().to_string(), ascending)
            }
            (kind, key) => {
                return Err(SessionError::InvalidArgument(format!(
                    "cannot sort {kind:?} records by {key:?}"
                )))
            }
        }
        self.metrics.record(timer.stop());
        Ok(())
    }

    // ── Matching ───────────────────────────────────────────────────────────

    /// Scores the current collections and stores the result as the last run.
    pub fn run_full_match(&mut self, scorer: &dyn MatchScorer, mode: MatchMode) -> &MatchRun {
        let timer = PhaseTimer::start(Phase::Match);
        let matches = match mode {
            MatchMode::All => ranker::all_pairs(scorer, &self.jobs, &self.resumes),
            MatchMode::Best => ranker::best_match_per_resume(scorer, &self.jobs, &self.resumes),
        };
        let timing = timer.stop();
        self.metrics.record(timing);
        self.metrics.comparisons = self.jobs.len() * self.resumes.len();
        tracing::info!(
            mode = ?mode,
            rows = matches.len(),
            comparisons = self.metrics.comparisons,
            elapsed_us = timing.elapsed_us,
            "Match run complete"
        );
        self.last_run.insert(MatchRun {
            mode,
            completed_at: Utc::now(),
            matches,
        })
    }

    /// Best job per resume over the current collections.
    pub fn best_matches(&self, scorer: &dyn MatchScorer) -> Vec<Match> {
        ranker::best_match_per_resume(scorer, &self.jobs, &self.resumes)
    }

    /// Top `k` rows of the last run; empty when nothing has run yet.
    pub fn top_k(&self, k: usize) -> Vec<Match> {
        self.last_run
            .as_ref()
            .map(|run| ranker::top_k(&run.matches, k))
            .unwrap_or_default()
    }

    pub fn rank_resumes_for_job(
        &self,
        scorer: &dyn MatchScorer,
        job_id: u32,
        k: usize,
    ) -> Option<Vec<Match>> {
        let job = self.jobs.find_by_id(job_id)?;
        Some(ranker::rank_resumes_for_job(scorer, job, &self.resumes, k))
    }

    pub fn rank_jobs_for_resume(
        &self,
        scorer: &dyn MatchScorer,
        resume_id: u32,
        k: usize,
    ) -> Option<Vec<Match>> {
        let resume = self.resumes.find_by_id(resume_id)?;
        Some(ranker::rank_jobs_for_resume(scorer, resume, &self.jobs, k))
    }

    pub fn breakdown(
        &self,
        scorer: &dyn MatchScorer,
        job_id: u32,
        resume_id: u32,
    ) -> Option<MatchBreakdown> {
        let job = self.jobs.find_by_id(job_id)?;
        let resume = self.resumes.find_by_id(resume_id)?;
        Some(MatchBreakdown::analyze(scorer, job, resume))
    }
}

fn place<T>(collection: &mut Collection<T>, record: T, placement: Placement) -> Result<(), CollectionError>
where
    T: crate::collection::Record,
{
    match placement {
        Placement::End => collection.insert_end(record),
        Placement::Front => collection.insert_front(record),
        Placement::At(position) => collection.insert_at(record, position),
    }
}
