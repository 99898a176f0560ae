/// Message service - submission pipeline and listing queries
///
/// Submission runs validate -> normalize alias -> classify -> persist and
/// returns the stored row. Classification cannot fail (the classifier
/// absorbs every remote error into its fallback), so a successful call
/// inserts exactly one row and there is no partial state to unwind.
use crate::error::{AppError, Result};
use crate::models::Message;
use crate::services::SentimentClassifier;
use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Display name substituted when the author leaves the alias blank.
const ANON_ALIAS: &str = "anon";

/// Default and maximum bounds for listing queries.
pub const DEFAULT_LIST_LIMIT: i64 = 50;
const MAX_LIST_LIMIT: i64 = 500;

pub struct MessageService {
    pool: SqlitePool,
    classifier: Arc<SentimentClassifier>,
}

impl MessageService {
    pub fn new(pool: SqlitePool, classifier: Arc<SentimentClassifier>) -> Self {
        Self { pool, classifier }
    }

    /// Submit a new message: reject empty text, default the alias, classify,
    /// persist. Returns the persisted row with its store-assigned id.
    pub async fn create_message(&self, alias: Option<&str>, text: &str) -> Result<Message> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AppError::ValidationError("text required".to_string()));
        }

        let alias = match alias {
            Some(a) if !a.trim().is_empty() => a,
            _ => ANON_ALIAS,
        };

        let sentiment = self.classifier.classify(trimmed).await;

        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (alias, text, sentiment_label, sentiment_score, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, alias, text, sentiment_label, sentiment_score, created_at
            "#,
        )
        .bind(alias)
        .bind(trimmed)
        .bind(sentiment.label.as_str())
        .bind(sentiment.score)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(
            id = message.id,
            alias = %message.alias,
            label = %message.sentiment_label,
            "message stored"
        );

        Ok(message)
    }

    /// List recent messages, newest first (descending by id), optionally
    /// restricted to an exact-match alias. Returns an empty vec, not an
    /// error, when nothing matches.
    pub async fn list_messages(
        &self,
        alias: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Vec<Message>> {
        let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT);

        let messages = match alias.filter(|a| !a.trim().is_empty()) {
            Some(alias) => {
                sqlx::query_as::<_, Message>(
                    r#"
                    SELECT id, alias, text, sentiment_label, sentiment_score, created_at
                    FROM messages
                    WHERE alias = $1
                    ORDER BY id DESC
                    LIMIT $2
                    "#,
                )
                .bind(alias)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Message>(
                    r#"
                    SELECT id, alias, text, sentiment_label, sentiment_score, created_at
                    FROM messages
                    ORDER BY id DESC
                    LIMIT $1
                    "#,
                )
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(messages)
    }

    /// Total number of stored messages.
    pub async fn count_messages(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
