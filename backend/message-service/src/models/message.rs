use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A persisted chat message. Rows are inserted exactly once and never
/// mutated; `id` is assigned by the store and its order matches creation
/// order.
#[derive(Debug, Clone, FromRow)]
pub struct Message {
    pub id: i64,
    pub alias: String,
    pub text: String,
    pub sentiment_label: String,
    pub sentiment_score: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// Nested sentiment object in the canonical response shape.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SentimentBody {
    pub label: String,
    pub score: Option<f64>,
}

/// Canonical wire representation of a message.
///
/// Older clients read the flattened `sentimentLabel`/`sentimentScore` fields
/// while newer ones read the nested `sentiment` object, so every response
/// carries both. Both are projected from the same `Message` row; the dual
/// shape never exists as two internal models.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: i64,
    pub alias: String,
    pub text: String,
    pub sentiment: SentimentBody,
    pub sentiment_label: String,
    pub sentiment_score: Option<f64>,
    /// Creation timestamp in ISO-8601 (UTC)
    pub created_at: String,
}

impl From<Message> for MessageResponse {
    fn from(m: Message) -> Self {
        MessageResponse {
            id: m.id,
            alias: m.alias,
            text: m.text,
            sentiment: SentimentBody {
                label: m.sentiment_label.clone(),
                score: m.sentiment_score,
            },
            sentiment_label: m.sentiment_label,
            sentiment_score: m.sentiment_score,
            created_at: m.created_at.to_rfc3339(),
        }
    }
}
