//! Transport error types

use thiserror::Error;

/// Failure talking to the assistant service
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Network, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Timeout, message)
    }

    pub fn status(code: u16, body: &str) -> Self {
        Self::new(
            TransportErrorKind::Status(code),
            format!("HTTP {code}: {body}"),
        )
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Decode, message)
    }
}

/// Error classification, used for logging only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Connection refused, DNS, reset
    Network,
    /// Configured request timeout elapsed
    Timeout,
    /// Non-2xx response
    Status(u16),
    /// Response body was not the expected JSON
    Decode,
}
