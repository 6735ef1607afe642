//! Collection steps and the pure step transition
//!
//! Steps only move forward: Idle → Name → Phone → Email → `PainPoints` →
//! Complete. Every call to [`next`](LeadStep::next) strictly advances until
//! Complete, so the skip chain in [`settle`] always terminates.

use super::form::{LeadField, LeadForm};
use std::fmt;

/// Current step of the lead collection state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LeadStep {
    #[default]
    Idle,
    Name,
    Phone,
    Email,
    PainPoints,
    Complete,
}

impl LeadStep {
    /// Field solicited at this step, `None` for Idle and Complete
    pub fn field(self) -> Option<LeadField> {
        match self {
            LeadStep::Name => Some(LeadField::Name),
            LeadStep::Phone => Some(LeadField::Phone),
            LeadStep::Email => Some(LeadField::Email),
            LeadStep::PainPoints => Some(LeadField::PainPoints),
            LeadStep::Idle | LeadStep::Complete => None,
        }
    }

    /// Following step within an episode. Idle and Complete are fixed points.
    pub fn next(self) -> Self {
        match self {
            LeadStep::Idle => LeadStep::Idle,
            LeadStep::Name => LeadStep::Phone,
            LeadStep::Phone => LeadStep::Email,
            LeadStep::Email => LeadStep::PainPoints,
            LeadStep::PainPoints | LeadStep::Complete => LeadStep::Complete,
        }
    }

    pub fn is_active(self) -> bool {
        self != LeadStep::Idle
    }
}

impl From<LeadField> for LeadStep {
    fn from(field: LeadField) -> Self {
        match field {
            LeadField::Name => LeadStep::Name,
            LeadField::Phone => LeadStep::Phone,
            LeadField::Email => LeadStep::Email,
            LeadField::PainPoints => LeadStep::PainPoints,
        }
    }
}

impl fmt::Display for LeadStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LeadStep::Idle => "idle",
            LeadStep::Name => "collecting name",
            LeadStep::Phone => "collecting phone",
            LeadStep::Email => "collecting email",
            LeadStep::PainPoints => "collecting pain points",
            LeadStep::Complete => "complete",
        };
        f.write_str(name)
    }
}

/// Skip chain: advance past every step whose field is already filled.
///
/// Stops at the first step with an empty field, or at Complete.
pub fn settle(step: LeadStep, form: &LeadForm) -> LeadStep {
    let mut step = step;
    while let Some(field) = step.field() {
        if !form.is_filled(field) {
            break;
        }
        step = step.next();
    }
    step
}

/// Result of applying one input to an active step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Accepted {
    /// Input written into `written`; the machine now sits at `step`.
    /// Pre-filled fields from `step` onward are skipped on the next input.
    Pending { written: LeadField, step: LeadStep },
    /// Every field is filled. `written` is `None` when the input was not
    /// consumed because nothing was left to fill.
    Complete { written: Option<LeadField> },
}

/// Apply `text` to the form at `step`.
///
/// Pre-filled fields are skipped before the input is consumed. After the
/// write the step advances by exactly one.
pub(super) fn accept(step: LeadStep, form: &mut LeadForm, text: String) -> Accepted {
    let Some(field) = settle(step, form).field() else {
        return Accepted::Complete { written: None };
    };
    form.fill(field, text);

    match LeadStep::from(field).next() {
        LeadStep::Complete => Accepted::Complete {
            written: Some(field),
        },
        step => Accepted::Pending {
            written: field,
            step,
        },
    }
}
