//! Conversation log
//!
//! Append-only record of the messages exchanged in a session. Insertion
//! order is display order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who sent a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
}

/// A single immutable log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    sender: Sender,
    lines: Vec<String>,
    timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a message, splitting `text` into display lines
    pub fn new(sender: Sender, text: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            sender,
            lines: text.split('\n').map(str::to_string).collect(),
            timestamp,
        }
    }

    #[allow(dead_code)] // Used in tests
    pub fn user(text: &str, timestamp: DateTime<Utc>) -> Self {
        Self::new(Sender::User, text, timestamp)
    }

    #[allow(dead_code)] // Used in tests
    pub fn assistant(text: &str, timestamp: DateTime<Utc>) -> Self {
        Self::new(Sender::Assistant, text, timestamp)
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Lines joined back into a single string
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Ordered messages of one session
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    messages: Vec<Message>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    #[allow(dead_code)] // Used in tests
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[allow(dead_code)] // Used in tests
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[allow(dead_code)] // API completeness
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
