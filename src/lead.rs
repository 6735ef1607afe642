//! Lead collection state machine
//!
//! Once the assistant service asks for contact details, the next user turns
//! are consumed as field values (name, phone, email, pain points) instead of
//! being sent to the service. Fields already filled are skipped. When the
//! last field is written the completed form is handed out for submission
//! and the machine resets to idle.

mod form;
mod step;


pub use form::{LeadField, LeadForm};
pub use step::LeadStep;

use step::Accepted;
use thiserror::Error;

/// Errors from driving the state machine outside its allowed steps
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeadError {
    #[error("Invalid state: cannot {action} while lead collection is {step}")]
    InvalidState { action: &'static str, step: LeadStep },
}

/// Outcome of [`LeadCollector::submit_field`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    /// Input stored in `field`; `next` is the field the following input
    /// will fill, or `None` when every remaining field is pre-filled and the
    /// following input only completes the episode.
    Collected {
        #[allow(dead_code)] // Used in tests
        field: LeadField,
        next: Option<LeadField>,
    },
    /// Every field is filled. The form is marked submitted and ownership
    /// passes to the caller. `consumed` names the field the input went into,
    /// if any.
    Completed {
        form: LeadForm,
        #[allow(dead_code)] // Used in tests
        consumed: Option<LeadField>,
    },
}

/// Lead collection state machine.
///
/// Holds the current step and, while an episode runs, the form being
/// filled. The form exists exactly when the step is not Idle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadCollector {
    step: LeadStep,
    form: Option<LeadForm>,
}

impl LeadCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an episode with an empty form.
    ///
    /// Calling again before any field is submitted is a no-op.
    pub fn activate(&mut self) -> Result<(), LeadError> {
        self.activate_with(LeadForm::new())
    }

    /// Start an episode seeded with fields from an earlier partial flow
    pub fn activate_with(&mut self, mut form: LeadForm) -> Result<(), LeadError> {
        match (self.step, self.form.as_ref()) {
            (LeadStep::Idle | LeadStep::Complete, _) => {}
            (LeadStep::Name, Some(current)) if current.is_empty() && form.is_empty() => {
                return Ok(());
            }
            (step, _) => {
                return Err(LeadError::InvalidState {
                    action: "activate",
                    step,
                })
            }
        }

        form.reset_submitted();
        self.step = LeadStep::Name;
        self.form = Some(form);
        tracing::debug!("Lead collection activated");
        Ok(())
    }

    /// Apply one user input to the field for the current step
    pub fn submit_field(&mut self, text: impl Into<String>) -> Result<FieldOutcome, LeadError> {
        let step = self.step;
        let Some(mut form) = self.form.take() else {
            return Err(LeadError::InvalidState {
                action: "submit a field",
                step,
            });
        };

        match step::accept(step, &mut form, text.into()) {
            Accepted::Pending { written, step } => {
                self.step = step;
                self.form = Some(form);
                let next = self.current_prompt_field();
                tracing::debug!(field = %written, step = %step, next = ?next, "Lead field collected");
                Ok(FieldOutcome::Collected {
                    field: written,
                    next,
                })
            }
            Accepted::Complete { written } => {
                form.mark_submitted();
                self.step = LeadStep::Idle;
                tracing::debug!(consumed = ?written, "Lead collection complete");
                Ok(FieldOutcome::Completed {
                    form,
                    consumed: written,
                })
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.step.is_active()
    }

    /// Field the next [`submit_field`](Self::submit_field) call will write,
    /// after skipping pre-filled fields
    pub fn current_prompt_field(&self) -> Option<LeadField> {
        let form = self.form.as_ref()?;
        step::settle(self.step, form).field()
    }

    #[allow(dead_code)] // Used in tests
    pub fn step(&self) -> LeadStep {
        self.step
    }

    /// Form of the running episode
    #[allow(dead_code)] // Used in tests
    pub fn form(&self) -> Option<&LeadForm> {
        self.form.as_ref()
    }
}
