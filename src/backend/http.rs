//! reqwest client for the assistant service

use super::types::{ChatRequest, ChatResponse, LeadSubmission};
use super::TransportError;
use reqwest::Client;
use serde::Serialize;
use std::time::{Duration, Instant};

const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Backend configuration
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the assistant service
    pub api_url: String,
    /// Per-request timeout; `None` keeps the transport default
    pub request_timeout: Option<Duration>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: None,
        }
    }
}

impl BackendConfig {
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("NEKKO_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            request_timeout: std::env::var("NEKKO_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs),
        }
    }
}

/// HTTP client for the chat and lead submission endpoints
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    #[allow(dead_code)] // Used in tests
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /chat`
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        let body = self.post_json("chat", request).await?;
        serde_json::from_str(&body).map_err(|e| {
            TransportError::decode(format!("Failed to parse chat response: {e} - body: {body}"))
        })
    }

    /// `POST /submit_lead`. The response body is ignored.
    pub async fn submit_lead(&self, submission: &LeadSubmission) -> Result<(), TransportError> {
        self.post_json("submit_lead", submission).await.map(|_| ())
    }

    async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<String, TransportError> {
        let url = format!("{}/{path}", self.base_url);
        let start = Instant::now();

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| classify_send_error(&e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::network(format!("Failed to read response: {e}")))?;

        tracing::debug!(
            url = %url,
            status = status.as_u16(),
            duration_ms = %start.elapsed().as_millis(),
            "Backend request finished"
        );

        if !status.is_success() {
            return Err(TransportError::status(status.as_u16(), &text));
        }
        Ok(text)
    }
}

fn classify_send_error(e: &reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::timeout(format!("Request timeout: {e}"))
    } else if e.is_connect() {
        TransportError::network(format!("Connection failed: {e}"))
    } else {
        TransportError::network(format!("Request failed: {e}"))
    }
}
