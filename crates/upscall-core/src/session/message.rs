//! Conversation message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// Message typed by the visitor.
    User,
    /// Message produced by the chat agent.
    Bot,
}

/// A single entry of the conversation log.
///
/// Messages are immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The sender of the message.
    pub sender: Sender,
    /// The text as displayed.
    pub text: String,
    /// When the message was appended to the log.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text)
    }

    fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn is_bot(&self) -> bool {
        self.sender == Sender::Bot
    }
}
