/// Message Service Library
///
/// A small chat backend where every stored message carries a sentiment
/// annotation. Messages are classified on submission (remote inference
/// endpoint with a keyword fallback), persisted once, and served back
/// newest-first.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers for the message endpoints
/// - `models`: Message record and canonical response shapes
/// - `services`: Submission/listing logic and the sentiment classifier
/// - `client`: API client used by the terminal front end
/// - `db`: Connection pool and startup migrations
/// - `error`: Error types and HTTP error mapping
/// - `config`: Configuration management
/// - `metrics`: Prometheus collectors and the /metrics handler
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod openapi;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
