/// Configuration management for Message Service
///
/// This module handles loading and managing configuration from environment
/// variables.
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Sentiment classifier configuration
    pub sentiment: SentimentConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (dev, staging, prod)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL (SQLite)
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
}

/// Sentiment classifier configuration.
///
/// The remote endpoint is optional: when `endpoint_url` is `None` the
/// classifier runs in fallback-only mode. Marker tokens and the positional
/// class order are configuration so a deployment can swap locale or upstream
/// model without a code change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentConfig {
    /// Remote inference endpoint; absence selects fallback-only mode
    pub endpoint_url: Option<String>,
    /// Upper bound on the remote call, in seconds
    pub timeout_secs: u64,
    /// Substrings that mark a message as positive
    pub positive_markers: Vec<String>,
    /// Substrings that mark a message as negative
    pub negative_markers: Vec<String>,
    /// Class order for positional labels (`LABEL_0`, `LABEL_1`, ...)
    pub label_classes: Vec<String>,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        SentimentConfig {
            endpoint_url: None,
            timeout_secs: 30,
            positive_markers: vec!["harika".to_string(), "iyi".to_string()],
            negative_markers: vec!["üzgün".to_string(), "kötü".to_string()],
            label_classes: vec![
                "negative".to_string(),
                "neutral".to_string(),
                "positive".to_string(),
            ],
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            app: AppConfig {
                env: app_env.clone(),
                host: std::env::var("MESSAGE_SERVICE_HOST")
                    .unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("MESSAGE_SERVICE_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
            },
            cors: {
                let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
                    Ok(value) => value,
                    Err(_) if app_env.eq_ignore_ascii_case("production") => {
                        return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
                    }
                    Err(_) => "http://localhost:3000".to_string(),
                };

                if app_env.eq_ignore_ascii_case("production") && allowed_origins.trim() == "*" {
                    return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
                }

                CorsConfig { allowed_origins }
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "sqlite://messages.db".to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|c| c.parse().ok())
                    .unwrap_or(5),
            },
            sentiment: SentimentConfig {
                endpoint_url: std::env::var("AI_URL").ok().filter(|u| !u.trim().is_empty()),
                timeout_secs: std::env::var("AI_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30),
                positive_markers: parse_marker_list(
                    "SENTIMENT_POSITIVE_MARKERS",
                    &SentimentConfig::default().positive_markers,
                ),
                negative_markers: parse_marker_list(
                    "SENTIMENT_NEGATIVE_MARKERS",
                    &SentimentConfig::default().negative_markers,
                ),
                label_classes: parse_marker_list(
                    "SENTIMENT_LABEL_CLASSES",
                    &SentimentConfig::default().label_classes,
                ),
            },
        })
    }
}

fn parse_marker_list(key: &str, default: &[String]) -> Vec<String> {
    match std::env::var(key) {
        Ok(raw) => {
            let values: Vec<String> = raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if values.is_empty() {
                default.to_vec()
            } else {
                values
            }
        }
        Err(_) => default.to_vec(),
    }
}
