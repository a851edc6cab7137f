/// Server-side session records.
pub mod session;

use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use crate::{config::AppConfig, dao::question_store::QuestionStore};

pub use self::session::ActiveSession;

/// Handle to the state shared by every handler.
pub type SharedState = Arc<AppState>;

/// Central server state: the question bank and the sessions currently open.
pub struct AppState {
    question_store: Arc<dyn QuestionStore>,
    sessions: DashMap<Uuid, ActiveSession>,
    config: AppConfig,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(question_store: Arc<dyn QuestionStore>, config: AppConfig) -> SharedState {
        Arc::new(Self {
            question_store,
            sessions: DashMap::new(),
            config,
        })
    }

    /// Handle to the question bank.
    pub fn question_store(&self) -> Arc<dyn QuestionStore> {
        self.question_store.clone()
    }

    /// Registry of open sessions keyed by their identifier.
    pub fn sessions(&self) -> &DashMap<Uuid, ActiveSession> {
        &self.sessions
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
