//! Library crate for trivia-back, exposing modules for binaries and integration tests.

/// Game client driving a quiz against the session API.
pub mod client;
/// Runtime configuration.
pub mod config;
/// Question storage.
pub mod dao;
/// Wire types shared by the server and the client.
pub mod dto;
/// Service and HTTP error types.
pub mod error;
/// HTTP routes.
pub mod routes;
/// Business logic behind the routes.
pub mod services;
/// Shared server state.
pub mod state;
