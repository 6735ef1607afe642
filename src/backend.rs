//! Assistant service backend
//!
//! HTTP/JSON client for the remote chat endpoint and the lead submission
//! endpoint.

mod error;
mod http;
mod types;

pub use error::{TransportError, TransportErrorKind};
pub use http::{BackendConfig, HttpBackend};
pub use types::{ChatRequest, ChatResponse, LeadSubmission};
