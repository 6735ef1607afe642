//! Lead form record and its fields

use std::fmt;

/// One of the four fields collected during an episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeadField {
    Name,
    Phone,
    Email,
    PainPoints,
}

impl LeadField {
    /// Collection order
    pub const ALL: [LeadField; 4] = [
        LeadField::Name,
        LeadField::Phone,
        LeadField::Email,
        LeadField::PainPoints,
    ];

    /// Wire name of the field
    pub fn as_str(self) -> &'static str {
        match self {
            LeadField::Name => "name",
            LeadField::Phone => "phone",
            LeadField::Email => "email",
            LeadField::PainPoints => "painPoints",
        }
    }

    /// Assistant prompt asking the user for this field
    pub fn prompt(self) -> &'static str {
        match self {
            LeadField::Name => "May I have your name?",
            LeadField::Phone => "What's the best phone number to reach you?",
            LeadField::Email => "What's your email address?",
            LeadField::PainPoints => "What challenges are you hoping we can help you with?",
        }
    }
}

impl fmt::Display for LeadField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contact details collected from the user.
///
/// Fields are only written by [`super::LeadCollector`] while an episode is
/// running. Pre-filled forms for [`super::LeadCollector::activate_with`] are
/// built with [`LeadForm::with`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadForm {
    name: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    pain_points: Option<String>,
    submitted: bool,
}

impl LeadForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder for a pre-filled form
    #[allow(dead_code)] // Used in tests
    #[must_use]
    pub fn with(mut self, field: LeadField, value: impl Into<String>) -> Self {
        *self.slot_mut(field) = Some(value.into());
        self
    }

    pub fn get(&self, field: LeadField) -> Option<&str> {
        match field {
            LeadField::Name => self.name.as_deref(),
            LeadField::Phone => self.phone.as_deref(),
            LeadField::Email => self.email.as_deref(),
            LeadField::PainPoints => self.pain_points.as_deref(),
        }
    }

    pub fn is_filled(&self, field: LeadField) -> bool {
        self.get(field).is_some()
    }

    /// True when no field holds a value
    pub fn is_empty(&self) -> bool {
        LeadField::ALL.iter().all(|f| !self.is_filled(*f))
    }

    #[allow(dead_code)] // Used in tests
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Write `value` into `field` if it is still empty. Returns whether the
    /// value was written.
    pub(super) fn fill(&mut self, field: LeadField, value: String) -> bool {
        let slot = self.slot_mut(field);
        if slot.is_some() {
            return false;
        }
        *slot = Some(value);
        true
    }

    pub(super) fn mark_submitted(&mut self) {
        self.submitted = true;
    }

    pub(super) fn reset_submitted(&mut self) {
        self.submitted = false;
    }

    fn slot_mut(&mut self, field: LeadField) -> &mut Option<String> {
        match field {
            LeadField::Name => &mut self.name,
            LeadField::Phone => &mut self.phone,
            LeadField::Email => &mut self.email,
            LeadField::PainPoints => &mut self.pain_points,
        }
    }
}
