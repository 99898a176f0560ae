/// API client for the message service, used by the terminal front end.
///
/// Mirrors what the browser and mobile clients do against the HTTP API:
/// fetch the recent feed, submit messages, and normalize whichever response
/// shape the server emits (nested `sentiment` object or the flattened
/// compatibility fields). A response body that is neither a JSON list nor a
/// JSON object is treated as an error, never rendered - some deployments
/// answer with diagnostic text instead of structured data.
use crate::models::SentimentBody;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("unexpected response body (not a JSON list or object)")]
    UnexpectedBody,

    #[error("could not parse response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Raw wire item. Field names vary between server versions: the alias may
/// arrive as `alias` or `userAlias`, and sentiment may be nested or
/// flattened.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiItem {
    id: i64,
    alias: Option<String>,
    user_alias: Option<String>,
    text: String,
    sentiment: Option<SentimentBody>,
    sentiment_label: Option<String>,
    sentiment_score: Option<f64>,
    created_at: String,
}

/// Normalized message as the client renders it.
#[derive(Debug, Clone)]
pub struct FeedMessage {
    pub id: i64,
    pub alias: String,
    pub sentiment: SentimentBody,
    pub text: String,
    pub created_at: String,
}

impl From<ApiItem> for FeedMessage {
    fn from(item: ApiItem) -> Self {
        let sentiment = item.sentiment.unwrap_or(SentimentBody {
            label: item.sentiment_label.unwrap_or_default(),
            score: item.sentiment_score,
        });
        FeedMessage {
            id: item.id,
            alias: item.alias.or(item.user_alias).unwrap_or_default(),
            sentiment,
            text: item.text,
            created_at: item.created_at,
        }
    }
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the recent feed, newest first.
    pub async fn list_messages(
        &self,
        alias: Option<&str>,
        limit: u32,
    ) -> Result<Vec<FeedMessage>, ClientError> {
        let mut request = self
            .http
            .get(format!("{}/api/v1/messages", self.base_url))
            .query(&[("limit", limit.to_string())]);
        if let Some(alias) = alias.filter(|a| !a.trim().is_empty()) {
            request = request.query(&[("alias", alias)]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }

        decode_list_body(&response.text().await?)
    }

    /// Submit a message and return the server's canonical record.
    pub async fn send_message(
        &self,
        alias: &str,
        text: &str,
    ) -> Result<FeedMessage, ClientError> {
        let response = self
            .http
            .post(format!("{}/api/v1/messages", self.base_url))
            .json(&serde_json::json!({ "alias": alias, "text": text }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }

        let item: ApiItem = serde_json::from_str(&response.text().await?)?;
        Ok(FeedMessage::from(item))
    }
}

/// Decode a listing response body. A JSON list is the normal shape; a lone
/// JSON object is wrapped as a single-element feed. Anything else - plain
/// diagnostic text, a bare JSON string - is an error, never rendered.
fn decode_list_body(body: &str) -> Result<Vec<FeedMessage>, ClientError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|_| ClientError::UnexpectedBody)?;

    let rows = match value {
        serde_json::Value::Array(items) => items,
        obj @ serde_json::Value::Object(_) => vec![obj],
        _ => return Err(ClientError::UnexpectedBody),
    };

    rows.into_iter()
        .map(|row| {
            serde_json::from_value::<ApiItem>(row)
                .map(FeedMessage::from)
                .map_err(ClientError::from)
        })
        .collect()
}

/// Best-effort persistence for the user's chosen alias: read once at
/// startup, written on every change, all failures silently ignored. Losing
/// the preference only means typing the alias again.
pub mod alias_preference {
    use super::PathBuf;

    fn state_file() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("PULSE_CLI_STATE_FILE") {
            return Some(PathBuf::from(path));
        }
        std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".pulse_alias"))
    }

    pub fn load() -> Option<String> {
        let path = state_file()?;
        let saved = std::fs::read_to_string(path).ok()?;
        let trimmed = saved.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    pub fn store(alias: &str) {
        if let Some(path) = state_file() {
            let _ = std::fs::write(path, alias);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_message_prefers_nested_sentiment() {
        let item: ApiItem = serde_json::from_str(
            r#"{"id": 1, "alias": "oguz", "text": "hi",
                "sentiment": {"label": "positive", "score": 0.9},
                "sentimentLabel": "stale", "sentimentScore": 0.1,
                "createdAt": "2025-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        let message = FeedMessage::from(item);
        assert_eq!(message.sentiment.label, "positive");
        assert_eq!(message.sentiment.score, Some(0.9));
    }

    #[test]
    fn feed_message_falls_back_to_flattened_fields() {
        let item: ApiItem = serde_json::from_str(
            r#"{"id": 2, "userAlias": "anon", "text": "hey",
                "sentimentLabel": "neutral", "sentimentScore": 0.5,
                "createdAt": "2025-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        let message = FeedMessage::from(item);
        assert_eq!(message.alias, "anon");
        assert_eq!(message.sentiment.label, "neutral");
        assert_eq!(message.sentiment.score, Some(0.5));
    }

    #[test]
    fn diagnostic_text_body_is_an_error_not_a_feed() {
        let err = decode_list_body("API URL yanlış veya JSON dönmüyor")
            .expect_err("plain text must not render");
        assert!(matches!(err, ClientError::UnexpectedBody));

        let err = decode_list_body(r#""ok""#).expect_err("bare JSON string must not render");
        assert!(matches!(err, ClientError::UnexpectedBody));
    }

    #[test]
    fn list_body_accepts_array_and_wraps_lone_object() {
        let array = decode_list_body(
            r#"[{"id": 1, "alias": "oguz", "text": "hi",
                "sentimentLabel": "neutral", "sentimentScore": 0.5,
                "createdAt": "2025-01-01T00:00:00Z"}]"#,
        )
        .unwrap();
        assert_eq!(array.len(), 1);

        let wrapped = decode_list_body(
            r#"{"id": 2, "alias": "ayse", "text": "hey",
                "sentimentLabel": "positive", "sentimentScore": 0.9,
                "createdAt": "2025-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(wrapped.len(), 1);
        assert_eq!(wrapped[0].alias, "ayse");
    }

    #[test]
    fn alias_preference_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alias");
        std::env::set_var("PULSE_CLI_STATE_FILE", &path);

        alias_preference::store("oguz");
        assert_eq!(alias_preference::load().as_deref(), Some("oguz"));

        std::env::remove_var("PULSE_CLI_STATE_FILE");
    }
}
