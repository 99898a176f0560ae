/// OpenAPI documentation for Pulse Message Service
use crate::handlers;
use crate::models::{MessageResponse, SentimentBody};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pulse Message Service API",
        version = "1.0.0",
        description = "Chat message service with sentiment annotation. Every submitted message is classified (remote inference endpoint with a keyword fallback) and stored with its polarity label and confidence score. Messages are listed newest-first with optional alias filtering.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development server"),
    ),
    paths(
        handlers::messages::create_message,
        handlers::messages::list_messages,
    ),
    components(
        schemas(
            handlers::messages::CreateMessageRequest,
            MessageResponse,
            SentimentBody,
        )
    ),
    tags(
        (name = "health", description = "Service health checks"),
        (name = "messages", description = "Message submission and listing"),
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    pub fn title() -> &'static str {
        "Pulse Message Service"
    }

    pub fn version() -> &'static str {
        "1.0.0"
    }
}
