/// Selection enums.
pub mod common;
/// Health check payload.
pub mod health;
/// Questions and their wire adapter.
pub mod question;
/// Session endpoint bodies.
pub mod session;
