/// Business logic layer for message-service
///
/// - Message service: submission pipeline and listing queries
/// - Sentiment classifier: remote inference with keyword fallback
pub mod messages;
pub mod sentiment;

// Re-export commonly used services
pub use messages::{MessageService, DEFAULT_LIST_LIMIT};
pub use sentiment::{Sentiment, SentimentClassifier, SentimentLabel};
