/// HTTP handlers for message endpoints
///
/// - Messages: submit a new message, list recent messages
pub mod messages;

// Re-export handler functions at module level
pub use messages::{create_message, list_messages};
