use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::matching::{MatchScorer, WeightedScorer};
use crate::session::{MatchSession, SessionSettings};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// The one match session this process owns. Handlers lock it for the
    /// duration of a single core operation.
    pub session: Arc<Mutex<MatchSession>>,
    /// Pluggable pair scorer. Default: WeightedScorer (60/40).
    pub scorer: Arc<dyn MatchScorer>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let session = MatchSession::new(SessionSettings::from(&config));
        Self::with_session(config, session)
    }

    pub fn with_session(config: Config, session: MatchSession) -> Self {
        let scorer = WeightedScorer::default();
        let weights = scorer.weights();
        tracing::debug!(skill = weights.skill, experience = weights.experience, "Scorer weights");
        Self {
            config,
            session: Arc::new(Mutex::new(session)),
            scorer: Arc::new(scorer),
        }
    }
}
