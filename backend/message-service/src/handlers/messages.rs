/// Message handlers - HTTP endpoints for submitting and listing messages
use crate::error::{AppError, Result};
use crate::metrics;
use crate::models::MessageResponse;
use crate::services::{MessageService, DEFAULT_LIST_LIMIT};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMessageRequest {
    /// Author-chosen display name; blank or absent defaults to "anon"
    pub alias: Option<String>,
    /// Message body; must be non-empty after trimming
    pub text: String,
}

/// Query parameters for listing messages
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListMessagesQuery {
    /// Exact-match alias filter
    pub alias: Option<String>,
    /// Maximum number of messages to return (default 50)
    pub limit: Option<i64>,
}

/// Submit a new message
#[utoipa::path(
    post,
    path = "/api/v1/messages",
    tag = "messages",
    request_body = CreateMessageRequest,
    responses(
        (status = 201, description = "Message stored", body = MessageResponse),
        (status = 400, description = "Empty or whitespace-only text"),
    )
)]
pub async fn create_message(
    service: web::Data<Arc<MessageService>>,
    req: web::Json<CreateMessageRequest>,
) -> Result<HttpResponse> {
    let message = match service
        .create_message(req.alias.as_deref(), &req.text)
        .await
    {
        Ok(message) => message,
        Err(err) => {
            if matches!(err, AppError::ValidationError(_)) {
                metrics::MESSAGES_REJECTED.inc();
            }
            return Err(err);
        }
    };

    metrics::MESSAGES_SUBMITTED.inc();
    Ok(HttpResponse::Created().json(MessageResponse::from(message)))
}

/// List recent messages, newest first
#[utoipa::path(
    get,
    path = "/api/v1/messages",
    tag = "messages",
    params(ListMessagesQuery),
    responses(
        (status = 200, description = "Recent messages, newest first", body = [MessageResponse]),
    )
)]
pub async fn list_messages(
    service: web::Data<Arc<MessageService>>,
    query: web::Query<ListMessagesQuery>,
) -> Result<HttpResponse> {
    metrics::LIST_REQUESTS.inc();

    let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT);
    let messages = service
        .list_messages(query.alias.as_deref(), Some(limit))
        .await?;

    let body: Vec<MessageResponse> = messages.into_iter().map(MessageResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}
