//! Conversation runtime executor

use super::traits::{ChatClient, LeadSink};
use crate::backend::ChatRequest;
use crate::conversation::{ConversationLog, Message};
use crate::state_machine::{transition, Effect, Event, SessionState, TransitionError};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};

/// Runs one session: owns the state and the log, executes effects, and
/// processes user input strictly one turn at a time.
pub struct ConversationRuntime<C, L>
where
    C: ChatClient + 'static,
    L: LeadSink + 'static,
{
    state: SessionState,
    log: ConversationLog,
    chat_client: Arc<C>,
    lead_sink: Arc<L>,
    input_rx: mpsc::Receiver<String>,
    broadcast_tx: broadcast::Sender<Message>,
}

impl<C, L> ConversationRuntime<C, L>
where
    C: ChatClient + 'static,
    L: LeadSink + 'static,
{
    pub fn new(
        chat_client: C,
        lead_sink: L,
        input_rx: mpsc::Receiver<String>,
        broadcast_tx: broadcast::Sender<Message>,
    ) -> Self {
        Self {
            state: SessionState::new(),
            log: ConversationLog::new(),
            chat_client: Arc::new(chat_client),
            lead_sink: Arc::new(lead_sink),
            input_rx,
            broadcast_tx,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    /// Show the greeting. Must run once before any user input.
    pub async fn start(&mut self) -> Result<(), TransitionError> {
        self.process_event(Event::SessionStarted).await
    }

    /// Process one user turn to completion, including any remote call
    pub async fn handle_user_input(&mut self, text: impl Into<String>) -> Result<(), TransitionError> {
        self.process_event(Event::user_message(text)).await
    }

    /// Start the session and consume input until the sender is dropped.
    ///
    /// Input arriving while a turn is in flight waits in the channel.
    pub async fn run(mut self) -> ConversationLog {
        tracing::info!("Starting conversation runtime");

        if let Err(e) = self.start().await {
            tracing::error!(error = %e, "Failed to start session");
        }

        while let Some(text) = self.input_rx.recv().await {
            if let Err(e) = self.handle_user_input(text).await {
                tracing::error!(error = %e, "Error handling user input");
            }
        }

        tracing::info!(messages = self.log.len(), "Conversation runtime stopped");
        self.log
    }

    async fn process_event(&mut self, event: Event) -> Result<(), TransitionError> {
        // Effects may produce follow-up events (remote call outcomes)
        let mut events_to_process = vec![event];

        while let Some(current_event) = events_to_process.pop() {
            let event_name = current_event.name();
            if let Event::ChatFailed { error } | Event::LeadSubmissionFailed { error } = &current_event {
                tracing::warn!(event = event_name, error = %error, kind = ?error.kind, "Remote call failed");
            }
            let result = transition(&self.state, current_event)?;

            if result.new_state.is_collecting() != self.state.is_collecting() {
                tracing::info!(
                    collecting = result.new_state.is_collecting(),
                    awaiting = ?result.new_state.lead.current_prompt_field(),
                    event = event_name,
                    "Lead collection mode changed"
                );
            }
            self.state = result.new_state;

            for effect in result.effects {
                if let Some(generated_event) = self.execute_effect(effect).await {
                    events_to_process.push(generated_event);
                }
            }
        }

        Ok(())
    }

    async fn execute_effect(&mut self, effect: Effect) -> Option<Event> {
        match effect {
            Effect::AppendMessage { sender, text } => {
                let message = Message::new(sender, &text, Utc::now());
                self.log.append(message.clone());
                // No subscribers is fine; the log is the source of truth
                let _ = self.broadcast_tx.send(message);
                None
            }

            Effect::RequestChat { user_query } => {
                let request = ChatRequest::new(user_query);
                match self.chat_client.send(&request).await {
                    Ok(response) => {
                        tracing::debug!(
                            requires_lead_info = response.requires_lead_info,
                            "Chat reply received"
                        );
                        Some(Event::ChatReply {
                            reply: response.reply,
                            requires_lead_info: response.requires_lead_info,
                        })
                    }
                    Err(error) => Some(Event::ChatFailed { error }),
                }
            }

            Effect::SubmitLead { form } => match self.lead_sink.submit(&form).await {
                Ok(()) => {
                    tracing::info!("Lead submitted");
                    Some(Event::LeadSubmitted)
                }
                Err(error) => Some(Event::LeadSubmissionFailed { error }),
            },
        }
    }
}
