use std::time::Instant;

use crate::dto::common::{Category, Difficulty};

/// Server-side record of an open game session.
#[derive(Debug, Clone)]
pub struct ActiveSession {
    /// Selection the session was opened with.
    pub difficulty: Difficulty,
    /// Category the session draws from.
    pub category: Category,
    /// Question ids drawn for the session, in play order.
    pub question_ids: Vec<i64>,
    /// When the session was opened.
    pub started_at: Instant,
}

impl ActiveSession {
    /// Record a session over an already drawn question order.
    pub fn new(difficulty: Difficulty, category: Category, question_ids: Vec<i64>) -> Self {
        Self {
            difficulty,
            category,
            question_ids,
            started_at: Instant::now(),
        }
    }
}
