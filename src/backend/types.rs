//! Wire types for the assistant service

use crate::lead::{LeadField, LeadForm};
use serde::{Deserialize, Serialize};

/// Body of `POST /chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub user_query: String,
}

impl ChatRequest {
    pub fn new(user_query: impl Into<String>) -> Self {
        Self {
            user_query: user_query.into(),
        }
    }
}

/// Response of `POST /chat`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    #[serde(default)]
    pub requires_lead_info: bool,
}

/// Body of `POST /submit_lead`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadSubmission {
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(rename = "painPoints")]
    pub pain_points: String,
}

impl From<&LeadForm> for LeadSubmission {
    fn from(form: &LeadForm) -> Self {
        let value = |field| form.get(field).unwrap_or_default().to_string();
        Self {
            name: value(LeadField::Name),
            phone: value(LeadField::Phone),
            email: value(LeadField::Email),
            pain_points: value(LeadField::PainPoints),
        }
    }
}
