use rand::seq::SliceRandom;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    dao::question_store::QuestionFilter,
    dto::{
        question::{Question, QuestionPayload},
        session::{StartSessionRequest, StartSessionResponse, StopSessionResponse},
    },
    error::ServiceError,
    state::{ActiveSession, SharedState},
};

/// Draw a shuffled question set matching the request and open a session over it.
pub async fn start_session(
    state: &SharedState,
    request: StartSessionRequest,
) -> Result<StartSessionResponse, ServiceError> {
    let StartSessionRequest {
        difficulty,
        category,
        question_count,
    } = request;

    let max = state.config().max_question_count;
    if question_count == 0 || question_count > max {
        return Err(ServiceError::InvalidInput(format!(
            "question count must be between 1 and {max} (got {question_count})"
        )));
    }

    let filter = QuestionFilter {
        difficulty,
        category,
    };
    let candidates = state.question_store().list_questions(filter).await?;
    if candidates.is_empty() {
        return Err(ServiceError::NotFound(format!(
            "no {difficulty} questions available for category `{category}`"
        )));
    }

    let mut question_ids = candidates.iter().map(|row| row.id).collect::<Vec<_>>();
    question_ids.shuffle(&mut rand::rng());
    question_ids.truncate(question_count as usize);

    if question_ids.len() < question_count as usize {
        warn!(
            requested = question_count,
            available = question_ids.len(),
            %difficulty,
            %category,
            "not enough questions; opening a shorter session"
        );
    }

    let session_id = Uuid::new_v4();
    info!(%session_id, %difficulty, %category, count = question_ids.len(), "session started");
    state.sessions().insert(
        session_id,
        ActiveSession::new(difficulty, category, question_ids),
    );

    Ok(StartSessionResponse { session_id })
}

/// Questions of an open session, normalized to the canonical wire shape.
pub async fn session_questions(
    state: &SharedState,
    session_id: Uuid,
) -> Result<Vec<Question>, ServiceError> {
    let question_ids = state
        .sessions()
        .get(&session_id)
        .map(|session| session.question_ids.clone())
        .ok_or_else(|| ServiceError::NotFound(format!("session `{session_id}` not found")))?;

    let rows = state.question_store().find_questions(question_ids).await?;
    Ok(rows
        .into_iter()
        .map(|row| QuestionPayload::from(row).normalize())
        .collect())
}

/// Close an open session.
pub async fn stop_session(
    state: &SharedState,
    session_id: Uuid,
) -> Result<StopSessionResponse, ServiceError> {
    let Some((_, session)) = state.sessions().remove(&session_id) else {
        return Err(ServiceError::NotFound(format!(
            "session `{session_id}` not found"
        )));
    };

    info!(
        %session_id,
        elapsed_ms = session.started_at.elapsed().as_millis() as u64,
        "session stopped"
    );
    Ok(StopSessionResponse { stopped: true })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::AppConfig,
        dao::question_store::JsonQuestionStore,
        dto::common::{Category, Difficulty},
        state::AppState,
    };

    fn state() -> SharedState {
        AppState::new(Arc::new(JsonQuestionStore::builtin()), AppConfig::default())
    }

    fn request(difficulty: Difficulty, category: Category, question_count: u32) -> StartSessionRequest {
        StartSessionRequest {
            difficulty,
            category,
            question_count,
        }
    }

    #[tokio::test]
    async fn start_then_fetch_then_stop() {
        let state = state();
        let started = start_session(&state, request(Difficulty::Easy, Category::Cats, 2))
            .await
            .unwrap();

        let questions = session_questions(&state, started.session_id).await.unwrap();
        assert_eq!(questions.len(), 2);
        assert!(questions.iter().all(|q| q.category == "cats" && q.difficulty == "easy"));

        let stopped = stop_session(&state, started.session_id).await.unwrap();
        assert!(stopped.stopped);

        let err = session_questions(&state, started.session_id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn short_bank_opens_shorter_session() {
        let state = state();
        let started = start_session(&state, request(Difficulty::Hard, Category::Cats, 10))
            .await
            .unwrap();
        let questions = session_questions(&state, started.session_id).await.unwrap();
        assert_eq!(questions.len(), 1);
    }

    #[tokio::test]
    async fn zero_questions_is_rejected() {
        let state = state();
        let err = start_session(&state, request(Difficulty::Easy, Category::Cats, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn empty_selection_is_not_found() {
        let state = AppState::new(Arc::new(JsonQuestionStore::new(Vec::new())), AppConfig::default());
        let err = start_session(&state, request(Difficulty::Easy, Category::Mixed, 5))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn stopping_unknown_session_fails() {
        let err = stop_session(&state(), Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
