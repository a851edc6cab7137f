use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::dto::{
    common::{Category, Difficulty},
    question::Question,
};

/// Upper bound accepted for `questionCount`.
pub const MAX_QUESTION_COUNT: u32 = 50;

/// Payload used to open a new game session.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequest {
    /// Difficulty of the drawn questions.
    pub difficulty: Difficulty,
    /// Category of the drawn questions; `mixed` draws from all of them.
    pub category: Category,
    /// Number of questions to draw.
    #[validate(range(min = 1, max = MAX_QUESTION_COUNT))]
    pub question_count: u32,
}

/// Identifier of the freshly opened session.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionResponse {
    /// Identifier to pass to the other session endpoints.
    pub session_id: Uuid,
}

/// Query string of `GET /questions`.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct QuestionsQuery {
    /// Session returned by `POST /start-session`.
    pub session_id: Uuid,
}

/// Questions drawn for a session, in play order.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct QuestionsResponse {
    /// Normalized questions.
    pub questions: Vec<Question>,
}

/// Payload used to close a session.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StopSessionRequest {
    /// Session to close.
    pub session_id: Uuid,
}

/// Acknowledgement returned once a session is closed.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StopSessionResponse {
    /// Always `true` once the session is gone.
    pub stopped: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_request_uses_camel_case() {
        let request: StartSessionRequest = serde_json::from_str(
            r#"{"difficulty":"medium","category":"cats","questionCount":10}"#,
        )
        .unwrap();
        assert_eq!(request.difficulty, Difficulty::Medium);
        assert_eq!(request.question_count, 10);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn question_count_is_bounded() {
        let mut request = StartSessionRequest {
            difficulty: Difficulty::Easy,
            category: Category::Mixed,
            question_count: 0,
        };
        assert!(request.validate().is_err());

        request.question_count = MAX_QUESTION_COUNT + 1;
        assert!(request.validate().is_err());

        request.question_count = MAX_QUESTION_COUNT;
        assert!(request.validate().is_ok());
    }
}
