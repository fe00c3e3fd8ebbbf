//! Application state: question banks, conjugation tables, in-memory
//! sessions, prompts, and the optional OpenAI client.
//!
//! This module owns:
//!   - the immutable content (banks + tables, built once at startup)
//!   - the session store (progress + last generated batch per exercise)
//!   - the prompts struct (from TOML or defaults)
//!   - optional OpenAI client

use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::banks::{conjugation_tables, question_banks};
use crate::config::{load_agent_config_from_env, Prompts};
use crate::conjugation::ConjugationTables;
use crate::domain::{ExerciseId, GeneratedQuestion, QuestionBanks};
use crate::openai::OpenAI;
use crate::scoring::Progress;

/// One learner session: progress plus the most recently generated batch per
/// exercise (the batch a submission is graded against).
#[derive(Clone)]
pub struct Session {
    pub id: String,
    pub progress: Progress,
    pub batches: HashMap<ExerciseId, Vec<GeneratedQuestion>>,
}

impl Session {
    fn new(id: String) -> Self {
        Self { id, progress: Progress::new(), batches: HashMap::new() }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub tables: Arc<ConjugationTables>,
    pub banks: Arc<QuestionBanks>,
    pub sessions: Arc<RwLock<HashMap<String, Session>>>,
    pub openai: Option<OpenAI>,
    pub prompts: Prompts,
}

impl AppState {
    /// Build state from env: load config, merge extra bank items, init
    /// OpenAI.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg_opt = load_agent_config_from_env();
        let prompts = cfg_opt
            .as_ref()
            .map(|c| c.prompts.clone())
            .unwrap_or_default();

        let mut banks = question_banks();
        if let Some(cfg) = cfg_opt {
            for (index, qc) in cfg.questions.into_iter().enumerate() {
                let pool = qc.pool;
                match qc.into_template() {
                    Some(template) => banks.push(pool, template),
                    None => {
                        error!(target: "drill", index, ?pool, "Skipping bank item: missing fields for its category.")
                    }
                }
            }
        }

        // Inventory summary by pool.
        for (pool, count) in banks.inventory() {
            info!(target: "drill", ?pool, count, "Startup question inventory");
        }

        // Build optional OpenAI client (if API key present).
        let openai = OpenAI::from_env();
        if let Some(oa) = &openai {
            info!(target: "ojala_backend", base_url = %oa.base_url, fast_model = %oa.fast_model, strong_model = %oa.strong_model, "OpenAI enabled.");
        } else {
            info!(target: "ojala_backend", "OpenAI disabled (no OPENAI_API_KEY). Using local feedback logic.");
        }

        Self {
            tables: Arc::new(conjugation_tables()),
            banks: Arc::new(banks),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            openai,
            prompts,
        }
    }

    /// Create a fresh session and return a snapshot of it.
    #[instrument(level = "info", skip(self))]
    pub async fn create_session(&self) -> Session {
        let session = Session::new(Uuid::new_v4().to_string());
        let snapshot = session.clone();
        self.sessions.write().await.insert(session.id.clone(), session);
        info!(target: "drill", id = %snapshot.id, "Session created");
        snapshot
    }

    /// Read-only snapshot of a session by id.
    #[instrument(level = "debug", skip(self), fields(%id))]
    pub async fn get_session(&self, id: &str) -> Option<Session> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Remember the batch a session must be graded against for an exercise.
    /// Unknown session ids are ignored (stateless generation is allowed).
    #[instrument(level = "debug", skip(self, batch), fields(%session_id, ?exercise, batch_len = batch.len()))]
    pub async fn store_batch(
        &self,
        session_id: &str,
        exercise: ExerciseId,
        batch: Vec<GeneratedQuestion>,
    ) {
        if let Some(session) = self.sessions.write().await.get_mut(session_id) {
            session.batches.insert(exercise, batch);
        }
    }

    /// Replace a session's progress after a submission.
    #[instrument(level = "debug", skip(self, progress), fields(%session_id))]
    pub async fn store_progress(&self, session_id: &str, progress: Progress) {
        if let Some(session) = self.sessions.write().await.get_mut(session_id) {
            session.progress = progress;
        }
    }
}
