//! Client-side contract of the session API.

use futures::future::BoxFuture;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::dto::{question::QuestionPayload, session::StartSessionRequest};

/// Convenient result alias returning [`ApiError`] failures.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failures that can occur while talking to the session API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build HTTP client")]
    ClientBuilder {
        /// Underlying reqwest failure.
        #[source]
        source: reqwest::Error,
    },
    /// The request never got a response.
    #[error("request to `{path}` failed")]
    RequestSend {
        /// Endpoint that was called.
        path: String,
        /// Underlying reqwest failure.
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status.
    #[error("request to `{path}` returned {status}{}", message_suffix(.message))]
    RequestStatus {
        /// Endpoint that was called.
        path: String,
        /// Status returned by the server.
        status: StatusCode,
        /// `message` field of the error body, when there was one.
        message: Option<String>,
    },
    /// The response body could not be decoded.
    #[error("failed to decode response from `{path}`")]
    DecodeResponse {
        /// Endpoint that was called.
        path: String,
        /// Underlying reqwest failure.
        #[source]
        source: reqwest::Error,
    },
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|message| format!(": {message}"))
        .unwrap_or_default()
}

/// Body of a successful `POST /start-session`, as tolerant as the server may be sloppy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionReply {
    /// Session to pass to the other endpoints.
    #[serde(default)]
    pub session_id: Option<String>,
    /// Failure reported inside a success response.
    #[serde(default, alias = "message")]
    pub error: Option<String>,
}

/// Body of `GET /questions`; a missing list is treated like an empty one by the game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QuestionsReply {
    /// Questions in either wire convention.
    #[serde(default)]
    pub questions: Option<Vec<QuestionPayload>>,
}

/// Session operations the game depends on.
pub trait SessionApi: Send + Sync {
    /// Open a session for the requested selection.
    fn start_session(
        &self,
        request: StartSessionRequest,
    ) -> BoxFuture<'static, ApiResult<StartSessionReply>>;
    /// Questions drawn for `session_id`.
    fn fetch_questions(&self, session_id: &str) -> BoxFuture<'static, ApiResult<QuestionsReply>>;
    /// Close `session_id`.
    fn stop_session(&self, session_id: &str) -> BoxFuture<'static, ApiResult<()>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_tolerates_missing_fields() {
        let reply: StartSessionReply = serde_json::from_str("{}").unwrap();
        assert_eq!(reply, StartSessionReply::default());

        let reply: StartSessionReply =
            serde_json::from_str(r#"{"message":"not found: no questions"}"#).unwrap();
        assert_eq!(reply.error.as_deref(), Some("not found: no questions"));

        let reply: QuestionsReply = serde_json::from_str("{}").unwrap();
        assert!(reply.questions.is_none());
    }

    #[test]
    fn status_error_mentions_server_message() {
        let err = ApiError::RequestStatus {
            path: "start-session".into(),
            status: StatusCode::NOT_FOUND,
            message: Some("no questions".into()),
        };
        assert_eq!(
            err.to_string(),
            "request to `start-session` returned 404 Not Found: no questions"
        );
    }
}
