//! Session state types

use crate::lead::LeadCollector;

/// Where the session is within the current turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Session created, greeting not yet shown
    #[default]
    AwaitingGreeting,
    /// Ready for the next user message
    Ready,
    /// Remote chat call outstanding
    AwaitingReply,
    /// Lead submission outstanding
    SubmittingLead,
}

impl Phase {
    /// A remote call is outstanding and user input must wait
    pub fn is_busy(self) -> bool {
        matches!(self, Phase::AwaitingReply | Phase::SubmittingLead)
    }
}

/// All mutable session state in one value.
///
/// Whether the session is collecting a lead is read from
/// [`LeadCollector::is_active`], never stored separately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub phase: Phase,
    pub lead: LeadCollector,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_collecting(&self) -> bool {
        self.lead.is_active()
    }

    /// Copy of this state in another phase
    pub fn with_phase(&self, phase: Phase) -> Self {
        Self {
            phase,
            lead: self.lead.clone(),
        }
    }
}
