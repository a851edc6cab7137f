use thiserror::Error;

/// Failures surfaced by [`TriviaGame`](super::TriviaGame) operations.
///
/// Every error leaves the game in a consistent state and is also emitted once as a
/// [`GameNotification::Error`](super::GameNotification::Error).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The start request failed or was rejected by the server.
    #[error("could not start a session: {0}")]
    SessionStartFailed(String),
    /// A success response lacked a required field.
    #[error("invalid server response: {0}")]
    InvalidServerResponse(String),
    /// Closing the session on the server failed; the local game still finished.
    #[error("could not stop the session: {0}")]
    SessionStopFailed(String),
    /// Questions could not be fetched or the requested one does not exist.
    #[error("could not load questions: {0}")]
    QuestionLoadError(String),
}
