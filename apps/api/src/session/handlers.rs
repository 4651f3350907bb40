use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::export::{render_csv, write_export};
use crate::ingest::parse_single_column;
use crate::matching::ranker::DEFAULT_RANK_LIMIT;
use crate::matching::MatchBreakdown;
use crate::models::{Job, JobUpdate, Match, NewJob, NewResume, Resume, ResumeUpdate};
use crate::session::{
    FoundRecord, LoadSummary, MatchMode, MatchRun, Placement, RecordKind, SessionError,
    SessionMetrics, SortKey,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoadJobsRequest {
    pub records: Vec<NewJob>,
}

#[derive(Deserialize)]
pub struct LoadResumesRequest {
    pub records: Vec<NewResume>,
}

#[derive(Deserialize)]
pub struct ImportQuery {
    pub limit: Option<usize>,
}

#[derive(Deserialize)]
pub struct InsertJobRequest {
    #[serde(flatten)]
    pub record: NewJob,
    #[serde(default)]
    pub placement: Placement,
}

#[derive(Deserialize)]
pub struct InsertResumeRequest {
    #[serde(flatten)]
    pub record: NewResume,
    #[serde(default)]
    pub placement: Placement,
}

#[derive(Deserialize)]
pub struct SortRequest {
    pub key: SortKey,
    #[serde(default = "default_ascending")]
    pub ascending: bool,
}

fn default_ascending() -> bool {
    true
}

#[derive(Deserialize)]
pub struct RankQuery {
    pub k: Option<usize>,
}

#[derive(Deserialize, Default)]
pub struct RunRequest {
    #[serde(default)]
    pub mode: MatchMode,
}

#[derive(Deserialize)]
pub struct BreakdownQuery {
    pub job_id: u32,
    pub resume_id: u32,
}

fn empty_body_error() -> AppError {
    SessionError::SourceUnavailable("CSV body is empty".to_string()).into()
}

// ────────────────────────────────────────────────────────────────────────────
// Jobs
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/jobs
pub async fn handle_list_jobs(State(state): State<AppState>) -> Json<Vec<Job>> {
    let session = state.session.lock().await;
    Json(session.jobs().iter().cloned().collect())
}

/// POST /api/v1/jobs
pub async fn handle_load_jobs(
    State(state): State<AppState>,
    Json(req): Json<LoadJobsRequest>,
) -> Json<LoadSummary> {
    let mut session = state.session.lock().await;
    Json(session.load_jobs(req.records))
}

/// POST /api/v1/jobs/import
pub async fn handle_import_jobs(
    State(state): State<AppState>,
    Query(params): Query<ImportQuery>,
    body: String,
) -> Result<Json<LoadSummary>, AppError> {
    if body.trim().is_empty() {
        return Err(empty_body_error());
    }
    let rows = parse_single_column(&body, params.limit.or(state.config.load_limit));
    let mut session = state.session.lock().await;
    Ok(Json(
        session.load_jobs(rows.into_iter().map(NewJob::from_description)),
    ))
}

/// POST /api/v1/jobs/insert
pub async fn handle_insert_job(
    State(state): State<AppState>,
    Json(req): Json<InsertJobRequest>,
) -> Result<(StatusCode, Json<Job>), AppError> {
    let mut session = state.session.lock().await;
    let job = session.insert_job(req.record, req.placement)?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// POST /api/v1/jobs/sort
pub async fn handle_sort_jobs(
    State(state): State<AppState>,
    Json(req): Json<SortRequest>,
) -> Result<Json<Vec<Job>>, AppError> {
    let mut session = state.session.lock().await;
    session.sort(RecordKind::Job, req.key, req.ascending)?;
    Ok(Json(session.jobs().iter().cloned().collect()))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Job>, AppError> {
    let mut session = state.session.lock().await;
    match session.find(RecordKind::Job, id) {
        Some(FoundRecord::Job(job)) => Ok(Json(job.clone())),
        _ => Err(AppError::NotFound(format!("Job {id} not found"))),
    }
}

/// PATCH /api/v1/jobs/:id
pub async fn handle_update_job(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(update): Json<JobUpdate>,
) -> Result<Json<Job>, AppError> {
    let mut session = state.session.lock().await;
    session
        .update_job(id, update)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))
}

/// DELETE /api/v1/jobs/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<StatusCode, AppError> {
    let mut session = state.session.lock().await;
    if session.remove(RecordKind::Job, id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Job {id} not found")))
    }
}

/// GET /api/v1/jobs/:id/matches
pub async fn handle_job_matches(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Query(params): Query<RankQuery>,
) -> Result<Json<Vec<Match>>, AppError> {
    let session = state.session.lock().await;
    let k = params.k.unwrap_or(DEFAULT_RANK_LIMIT);
    session
        .rank_resumes_for_job(state.scorer.as_ref(), id, k)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))
}

// ────────────────────────────────────────────────────────────────────────────
// Resumes
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/resumes
pub async fn handle_list_resumes(State(state): State<AppState>) -> Json<Vec<Resume>> {
    let session = state.session.lock().await;
    Json(session.resumes().iter().cloned().collect())
}

/// POST /api/v1/resumes
pub async fn handle_load_resumes(
    State(state): State<AppState>,
    Json(req): Json<LoadResumesRequest>,
) -> Json<LoadSummary> {
    let mut session = state.session.lock().await;
    Json(session.load_resumes(req.records))
}

/// POST /api/v1/resumes/import
pub async fn handle_import_resumes(
    State(state): State<AppState>,
    Query(params): Query<ImportQuery>,
    body: String,
) -> Result<Json<LoadSummary>, AppError> {
    if body.trim().is_empty() {
        return Err(empty_body_error());
    }
    let rows = parse_single_column(&body, params.limit.or(state.config.load_limit));
    let mut session = state.session.lock().await;
    Ok(Json(
        session.load_resumes(rows.into_iter().map(NewResume::from_summary)),
    ))
}

/// POST /api/v1/resumes/insert
pub async fn handle_insert_resume(
    State(state): State<AppState>,
    Json(req): Json<InsertResumeRequest>,
) -> Result<(StatusCode, Json<Resume>), AppError> {
    let mut session = state.session.lock().await;
    let resume = session.insert_resume(req.record, req.placement)?;
    Ok((StatusCode::CREATED, Json(resume)))
}

/// POST /api/v1/resumes/sort
pub async fn handle_sort_resumes(
    State(state): State<AppState>,
    Json(req): Json<SortRequest>,
) -> Result<Json<Vec<Resume>>, AppError> {
    let mut session = state.session.lock().await;
    session.sort(RecordKind::Resume, req.key, req.ascending)?;
    Ok(Json(session.resumes().iter().cloned().collect()))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Resume>, AppError> {
    let mut session = state.session.lock().await;
    match session.find(RecordKind::Resume, id) {
        Some(FoundRecord::Resume(resume)) => Ok(Json(resume.clone())),
        _ => Err(AppError::NotFound(format!("Resume {id} not found"))),
    }
}

/// PATCH /api/v1/resumes/:id
pub async fn handle_update_resume(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(update): Json<ResumeUpdate>,
) -> Result<Json<Resume>, AppError> {
    let mut session = state.session.lock().await;
    session
        .update_resume(id, update)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<StatusCode, AppError> {
    let mut session = state.session.lock().await;
    if session.remove(RecordKind::Resume, id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Resume {id} not found")))
    }
}

/// GET /api/v1/resumes/:id/matches
pub async fn handle_resume_matches(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Query(params): Query<RankQuery>,
) -> Result<Json<Vec<Match>>, AppError> {
    let session = state.session.lock().await;
    let k = params.k.unwrap_or(DEFAULT_RANK_LIMIT);
    session
        .rank_jobs_for_resume(state.scorer.as_ref(), id, k)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
}

// ────────────────────────────────────────────────────────────────────────────
// Matches
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/matches/run
pub async fn handle_run_matches(
    State(state): State<AppState>,
    req: Option<Json<RunRequest>>,
) -> Json<MatchRun> {
    let Json(req) = req.unwrap_or_default();
    let (run, csv) = {
        let mut session = state.session.lock().await;
        let run = session.run_full_match(state.scorer.as_ref(), req.mode).clone();
        let csv = state.config.export_path.as_ref().map(|_| render_csv(&run));
        (run, csv)
    };

    // Export is best effort; a failed write never fails the run.
    if let (Some(path), Some(csv)) = (state.config.export_path.as_deref(), csv) {
        if let Err(e) = write_export(path, &csv).await {
            tracing::warn!("{e:#}");
        }
    }
    Json(run)
}

/// GET /api/v1/matches/best
pub async fn handle_best_matches(State(state): State<AppState>) -> Json<Vec<Match>> {
    let session = state.session.lock().await;
    Json(session.best_matches(state.scorer.as_ref()))
}

/// GET /api/v1/matches/top
pub async fn handle_top_matches(
    State(state): State<AppState>,
    Query(params): Query<RankQuery>,
) -> Json<Vec<Match>> {
    let session = state.session.lock().await;
    Json(session.top_k(params.k.unwrap_or(DEFAULT_RANK_LIMIT)))
}

/// GET /api/v1/matches/breakdown
pub async fn handle_match_breakdown(
    State(state): State<AppState>,
    Query(params): Query<BreakdownQuery>,
) -> Result<Json<MatchBreakdown>, AppError> {
    let session = state.session.lock().await;
    session
        .breakdown(state.scorer.as_ref(), params.job_id, params.resume_id)
        .map(Json)
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Job {} or resume {} not found",
                params.job_id, params.resume_id
            ))
        })
}

/// GET /api/v1/matches/export
pub async fn handle_export_matches(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.session.lock().await;
    let run = session
        .last_run()
        .ok_or_else(|| AppError::NotFound("No match run yet".to_string()))?;
    Ok((
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        render_csv(run),
    ))
}

/// GET /api/v1/metrics
pub async fn handle_metrics(State(state): State<AppState>) -> Json<SessionMetrics> {
    let session = state.session.lock().await;
    Json(session.metrics().clone())
}
