use axum::Router;

use crate::state::SharedState;

/// Swagger UI.
pub mod docs;
/// Health check route.
pub mod health;
/// Session routes.
pub mod session;

/// Compose all route trees and attach the shared state.
pub fn router(state: SharedState) -> Router<()> {
    health::router()
        .merge(session::router())
        .merge(docs::router())
        .with_state(state)
}
