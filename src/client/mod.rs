//! Game client: drives one player through welcome, question and finished screens against the
//! session API.

/// Session API contract.
pub mod api;
/// Errors reported by game operations.
pub mod error;
/// Async game controller.
pub mod game;
/// HTTP implementation of the session API.
pub mod http;
/// Game state and transitions.
pub mod session;
/// Per-question countdown.
pub mod timer;

pub use self::api::SessionApi;
pub use self::error::GameError;
pub use self::game::{GameConfig, GameInput, GameNotification, TriviaGame};
pub use self::http::HttpSessionApi;
pub use self::session::{Advance, GameSession, GameSettings, Screen};
