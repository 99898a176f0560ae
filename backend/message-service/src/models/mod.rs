/// Data models for message-service
///
/// - `Message`: the persisted chat message row (write-once)
/// - `MessageResponse`: the canonical wire shape, carrying both the nested
///   `sentiment` object and the flattened compatibility fields
pub mod message;

pub use message::{Message, MessageResponse, SentimentBody};
