//! Events that can occur in a session

use crate::backend::TransportError;

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    // Session events
    SessionStarted,

    // User events
    UserMessage {
        text: String,
    },

    // Chat endpoint events
    ChatReply {
        reply: String,
        requires_lead_info: bool,
    },
    ChatFailed {
        error: TransportError,
    },

    // Lead submission events
    LeadSubmitted,
    LeadSubmissionFailed {
        error: TransportError,
    },
}

impl Event {
    pub fn user_message(text: impl Into<String>) -> Self {
        Event::UserMessage { text: text.into() }
    }

    /// Short name for logs and error messages
    pub fn name(&self) -> &'static str {
        match self {
            Event::SessionStarted => "session_started",
            Event::UserMessage { .. } => "user_message",
            Event::ChatReply { .. } => "chat_reply",
            Event::ChatFailed { .. } => "chat_failed",
            Event::LeadSubmitted => "lead_submitted",
            Event::LeadSubmissionFailed { .. } => "lead_submission_failed",
        }
    }
}
