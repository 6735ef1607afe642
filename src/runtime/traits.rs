//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the executor with mock implementations.

use crate::backend::{ChatRequest, ChatResponse, HttpBackend, LeadSubmission, TransportError};
use crate::lead::LeadForm;
use async_trait::async_trait;
use std::sync::Arc;

/// Client for the remote chat endpoint
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send one user query and wait for the assistant's reply
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError>;
}

/// Destination for completed lead forms
#[async_trait]
pub trait LeadSink: Send + Sync {
    /// Submit a completed form. Success carries no payload.
    async fn submit(&self, form: &LeadForm) -> Result<(), TransportError>;
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: ChatClient + ?Sized> ChatClient for Arc<T> {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        (**self).send(request).await
    }
}

#[async_trait]
impl<T: LeadSink + ?Sized> LeadSink for Arc<T> {
    async fn submit(&self, form: &LeadForm) -> Result<(), TransportError> {
        (**self).submit(form).await
    }
}

// ============================================================================
// Production Adapters
// ============================================================================

#[async_trait]
impl ChatClient for HttpBackend {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        self.chat(request).await
    }
}

#[async_trait]
impl LeadSink for HttpBackend {
    async fn submit(&self, form: &LeadForm) -> Result<(), TransportError> {
        self.submit_lead(&LeadSubmission::from(form)).await
    }
}
