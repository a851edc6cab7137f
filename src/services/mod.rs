/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Session lifecycle and question selection.
pub mod session_service;
