use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Report whether the question bank can serve sessions.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    match state.question_store().count().await {
        Ok(0) => {
            warn!("question bank is empty");
            HealthResponse::degraded()
        }
        Ok(count) => HealthResponse::ok(count),
        Err(err) => {
            warn!(error = %err, "question store health check failed");
            HealthResponse::degraded()
        }
    }
}
