//! Runtime for executing a conversation session

mod executor;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use executor::ConversationRuntime;

use crate::backend::HttpBackend;
use std::sync::Arc;

/// Type alias for production runtime with concrete implementations
pub type ProductionRuntime = ConversationRuntime<Arc<HttpBackend>, Arc<HttpBackend>>;
