//! Pure state transition function
//!
//! Decides, for every event, the next session state and the effects the
//! runtime must perform. No I/O happens here.

use super::{Effect, Event, Phase, SessionState};
use crate::lead::{FieldOutcome, LeadError, LeadField};
use thiserror::Error;

pub const GREETING: &str = "Hello! I'm Nekko BhAI. How can I help you today?";
pub const CHAT_FAILURE: &str = "Sorry, I'm having trouble connecting. Please try again later.";
pub const LEAD_SUBMITTED: &str = "Thank you! We'll contact you shortly.";
pub const LEAD_SUBMISSION_FAILED: &str = "Failed to save your details. Please try again later.";
pub const LEAD_CONFIRM: &str = "Thanks! Send any message to confirm and I'll submit your details.";

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("Session has not started yet")]
    NotStarted,
    #[error("Session already started")]
    AlreadyStarted,
    #[error("A turn is still in progress, wait for it to finish")]
    TurnInProgress,
    #[error(transparent)]
    Lead(#[from] LeadError),
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function.
///
/// On error the caller keeps its current state; nothing here mutates
/// `state`.
pub fn transition(state: &SessionState, event: Event) -> Result<TransitionResult, TransitionError> {
    match (state.phase, event) {
        // Greeting is shown exactly once, before any user input
        (Phase::AwaitingGreeting, Event::SessionStarted) => {
            Ok(TransitionResult::new(state.with_phase(Phase::Ready))
                .with_effect(Effect::assistant_message(GREETING)))
        }
        (_, Event::SessionStarted) => Err(TransitionError::AlreadyStarted),

        (Phase::AwaitingGreeting, Event::UserMessage { .. }) => Err(TransitionError::NotStarted),
        (phase, Event::UserMessage { .. }) if phase.is_busy() => {
            Err(TransitionError::TurnInProgress)
        }

        // Collecting: the message is a field value and never reaches the
        // chat endpoint
        (Phase::Ready, Event::UserMessage { text }) if state.is_collecting() => {
            collect_field(state, text)
        }

        // Free chat
        (Phase::Ready, Event::UserMessage { text }) => {
            Ok(TransitionResult::new(state.with_phase(Phase::AwaitingReply))
                .with_effect(Effect::user_message(text.clone()))
                .with_effect(Effect::RequestChat { user_query: text }))
        }

        // Activation only routes the next turn; this turn's answer is the
        // reply itself
        (
            Phase::AwaitingReply,
            Event::ChatReply {
                reply,
                requires_lead_info,
            },
        ) => {
            let mut next = state.with_phase(Phase::Ready);
            if requires_lead_info {
                next.lead.activate()?;
            }
            Ok(TransitionResult::new(next).with_effect(Effect::assistant_message(reply)))
        }

        (Phase::AwaitingReply, Event::ChatFailed { .. }) => {
            Ok(TransitionResult::new(state.with_phase(Phase::Ready))
                .with_effect(Effect::assistant_message(CHAT_FAILURE)))
        }

        // The episode already ended when the form was handed out, so a
        // failed submission does not re-arm collection
        (Phase::SubmittingLead, Event::LeadSubmitted) => {
            Ok(TransitionResult::new(state.with_phase(Phase::Ready))
                .with_effect(Effect::assistant_message(LEAD_SUBMITTED)))
        }
        (Phase::SubmittingLead, Event::LeadSubmissionFailed { .. }) => {
            Ok(TransitionResult::new(state.with_phase(Phase::Ready))
                .with_effect(Effect::assistant_message(LEAD_SUBMISSION_FAILED)))
        }

        (phase, event) => Err(TransitionError::InvalidTransition(format!(
            "{} while {phase:?}",
            event.name()
        ))),
    }
}

fn collect_field(state: &SessionState, text: String) -> Result<TransitionResult, TransitionError> {
    let mut lead = state.lead.clone();
    let outcome = lead.submit_field(text.clone())?;
    let user = Effect::user_message(text);

    match outcome {
        FieldOutcome::Collected { next, .. } => Ok(TransitionResult::new(SessionState {
            phase: Phase::Ready,
            lead,
        })
        .with_effect(user)
        .with_effect(Effect::assistant_message(
            next.map_or(LEAD_CONFIRM, LeadField::prompt),
        ))),
        FieldOutcome::Completed { form, .. } => Ok(TransitionResult::new(SessionState {
            phase: Phase::SubmittingLead,
            lead,
        })
        .with_effect(user)
        .with_effect(Effect::SubmitLead { form })),
    }
}
