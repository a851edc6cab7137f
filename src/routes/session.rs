use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use validator::Validate;

use crate::{
    dto::session::{
        QuestionsQuery, QuestionsResponse, StartSessionRequest, StartSessionResponse,
        StopSessionRequest, StopSessionResponse,
    },
    error::AppError,
    services::session_service,
    state::SharedState,
};

/// Routes driving a game session from start to stop.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/start-session", post(start_session))
        .route("/questions", get(questions))
        .route("/stop-session", post(stop_session))
}

/// Open a session and draw its questions.
#[utoipa::path(
    post,
    path = "/start-session",
    tag = "session",
    request_body = StartSessionRequest,
    responses(
        (status = 200, description = "Session started", body = StartSessionResponse),
        (status = 400, description = "Invalid selection"),
        (status = 404, description = "No question matches the selection")
    )
)]
pub async fn start_session(
    State(state): State<SharedState>,
    Json(payload): Json<StartSessionRequest>,
) -> Result<Json<StartSessionResponse>, AppError> {
    payload.validate()?;
    let response = session_service::start_session(&state, payload).await?;
    Ok(Json(response))
}

/// Questions drawn for a session.
#[utoipa::path(
    get,
    path = "/questions",
    tag = "session",
    params(QuestionsQuery),
    responses(
        (status = 200, description = "Questions of the session", body = QuestionsResponse),
        (status = 404, description = "Unknown session")
    )
)]
pub async fn questions(
    State(state): State<SharedState>,
    Query(query): Query<QuestionsQuery>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let questions = session_service::session_questions(&state, query.session_id).await?;
    Ok(Json(QuestionsResponse { questions }))
}

/// Close a session.
#[utoipa::path(
    post,
    path = "/stop-session",
    tag = "session",
    request_body = StopSessionRequest,
    responses(
        (status = 200, description = "Session stopped", body = StopSessionResponse),
        (status = 404, description = "Unknown session")
    )
)]
pub async fn stop_session(
    State(state): State<SharedState>,
    Json(payload): Json<StopSessionRequest>,
) -> Result<Json<StopSessionResponse>, AppError> {
    let response = session_service::stop_session(&state, payload.session_id).await?;
    Ok(Json(response))
}
