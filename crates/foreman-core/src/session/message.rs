//! Chat transcript message types.

use serde::{Deserialize, Serialize};

/// Represents the role of a message in the chat transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the assistant backend.
    Assistant,
    /// Client-synthesized message (start announcements, action summaries,
    /// inline error reports).
    System,
}

/// A single entry in the chat transcript.
///
/// Transcript entries are append-only within a session and never reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The role of the message sender.
    pub role: MessageRole,
    /// The message text.
    pub text: String,
    /// Timestamp when the message was created (ISO 8601 format).
    pub timestamp: String,
}

impl ChatMessage {
    fn new(role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Creates a user message. The text is stored untrimmed; trimming is a
    /// guard concern, not a display concern.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(MessageRole::User, text)
    }

    /// Creates an assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, text)
    }

    /// Creates a system message.
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(MessageRole::System, text)
    }
}
