use serde::Serialize;
use utoipa::ToSchema;

/// Simple health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok" or "degraded").
    pub status: String,
    /// Number of questions currently available to sessions.
    pub questions: usize,
}

impl HealthResponse {
    /// Create a health response indicating the system is operational.
    pub fn ok(questions: usize) -> Self {
        Self {
            status: "ok".to_string(),
            questions,
        }
    }

    /// Create a health response indicating no question can be served.
    pub fn degraded() -> Self {
        Self {
            status: "degraded".to_string(),
            questions: 0,
        }
    }
}
