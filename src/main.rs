//! Nekko chat - terminal front-end for the Nekko BhAI assistant
//!
//! Relays free-text messages to the assistant service and, when the service
//! asks for it, collects the user's contact details over the next turns.

mod backend;
mod conversation;
mod lead;
mod render;
mod runtime;
mod state_machine;

use backend::{BackendConfig, HttpBackend};
use chrono::Local;
use runtime::{ConversationRuntime, ProductionRuntime};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{broadcast, mpsc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging; stdout is reserved for the conversation
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nekko_chat=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Configuration
    let config = BackendConfig::from_env();
    tracing::info!(
        api_url = %config.api_url,
        timeout_secs = ?config.request_timeout.map(|t| t.as_secs()),
        "Using assistant service"
    );
    let backend = Arc::new(HttpBackend::new(&config)?);

    let (input_tx, input_rx) = mpsc::channel(32);
    let (broadcast_tx, mut broadcast_rx) = broadcast::channel(128);

    let runtime: ProductionRuntime =
        ConversationRuntime::new(backend.clone(), backend, input_rx, broadcast_tx);
    let conversation = tokio::spawn(runtime.run());

    let printer = tokio::spawn(async move {
        loop {
            match broadcast_rx.recv().await {
                Ok(message) => println!("{}", render::format_message(&message, &Local)),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Renderer lagged behind the conversation");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    // Blank lines are ignored, matching the send button being a no-op on
    // empty input
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        if input_tx.send(line).await.is_err() {
            break;
        }
    }
    drop(input_tx);

    let log = conversation.await?;
    printer.await?;
    tracing::info!(messages = log.len(), "Session ended");

    Ok(())
}
