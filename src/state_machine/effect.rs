//! Effects produced by state transitions

use crate::conversation::Sender;
use crate::lead::LeadForm;

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append a message to the conversation log
    AppendMessage { sender: Sender, text: String },

    /// Send the user's text to the remote chat endpoint
    RequestChat { user_query: String },

    /// Hand a completed form to the lead submission endpoint
    SubmitLead { form: LeadForm },
}

impl Effect {
    pub fn user_message(text: impl Into<String>) -> Self {
        Effect::AppendMessage {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn assistant_message(text: impl Into<String>) -> Self {
        Effect::AppendMessage {
            sender: Sender::Assistant,
            text: text.into(),
        }
    }
}
