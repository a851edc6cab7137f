use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the trivia session API.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::session::start_session,
        crate::routes::session::questions,
        crate::routes::session::stop_session,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::common::Difficulty,
            crate::dto::common::Category,
            crate::dto::question::Question,
            crate::dto::session::StartSessionRequest,
            crate::dto::session::StartSessionResponse,
            crate::dto::session::QuestionsResponse,
            crate::dto::session::StopSessionRequest,
            crate::dto::session::StopSessionResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "session", description = "Game session lifecycle and question retrieval"),
    )
)]
/// OpenAPI document of the server.
pub struct ApiDoc;
