use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::collection::BackendKind;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub backend: BackendKind,
    pub job_capacity: usize,
    pub resume_capacity: usize,
    pub job_skill_cap: usize,
    pub resume_skill_cap: usize,
    /// Optional CSV sources loaded at startup.
    pub jobs_csv: Option<PathBuf>,
    pub resumes_csv: Option<PathBuf>,
    /// Caps the rows taken from each CSV source.
    pub load_limit: Option<usize>,
    /// When set, every match run is also written here as CSV.
    pub export_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            backend: BackendKind::Linked,
            job_capacity: 20_000,
            resume_capacity: 20_000,
            job_skill_cap: 10,
            resume_skill_cap: 20,
            jobs_csv: None,
            resumes_csv: None,
            load_limit: None,
            export_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            backend: parse_env("COLLECTION_BACKEND", defaults.backend)?,
            job_capacity: parse_env("JOB_CAPACITY", defaults.job_capacity)?,
            resume_capacity: parse_env("RESUME_CAPACITY", defaults.resume_capacity)?,
            job_skill_cap: parse_env("JOB_SKILL_CAP", defaults.job_skill_cap)?,
            resume_skill_cap: parse_env("RESUME_SKILL_CAP", defaults.resume_skill_cap)?,
            jobs_csv: optional_env("JOBS_CSV").map(PathBuf::from),
            resumes_csv: optional_env("RESUMES_CSV").map(PathBuf::from),
            load_limit: optional_env("LOAD_LIMIT")
                .map(|raw| parse_value("LOAD_LIMIT", &raw))
                .transpose()?,
            export_path: optional_env("EXPORT_PATH").map(PathBuf::from),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse::<T>()
        .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'"))
}
