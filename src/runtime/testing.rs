//! Mock implementations for testing
//!
//! These mocks enable integration testing without real I/O.

use super::traits::*;
use super::ConversationRuntime;
use crate::backend::{ChatRequest, ChatResponse, TransportError};
use crate::conversation::Message;
use crate::lead::LeadForm;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{broadcast, mpsc};

// ============================================================================
// Mock Chat Client
// ============================================================================

/// Mock chat client that returns queued responses
pub struct MockChatClient {
    responses: Mutex<VecDeque<Result<ChatResponse, TransportError>>>,
    /// Record of all requests made
    pub requests: Mutex<Vec<ChatRequest>>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful reply
    pub fn queue_reply(&self, reply: &str, requires_lead_info: bool) {
        self.responses.lock().unwrap().push_back(Ok(ChatResponse {
            reply: reply.to_string(),
            requires_lead_info,
        }));
    }

    /// Queue a transport failure
    pub fn queue_error(&self, error: TransportError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Queries sent so far
    pub fn recorded_queries(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.user_query.clone())
            .collect()
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::network("No mock response queued")))
    }
}

// ============================================================================
// Mock Lead Sink
// ============================================================================

/// Mock lead sink; succeeds unless a failure is queued
pub struct MockLeadSink {
    failures: Mutex<VecDeque<TransportError>>,
    /// Forms received, in order
    pub submissions: Mutex<Vec<LeadForm>>,
}

impl MockLeadSink {
    pub fn new() -> Self {
        Self {
            failures: Mutex::new(VecDeque::new()),
            submissions: Mutex::new(Vec::new()),
        }
    }

    /// Make the next submission fail
    pub fn queue_failure(&self, error: TransportError) {
        self.failures.lock().unwrap().push_back(error);
    }

    pub fn recorded_submissions(&self) -> Vec<LeadForm> {
        self.submissions.lock().unwrap().clone()
    }
}

impl Default for MockLeadSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LeadSink for MockLeadSink {
    async fn submit(&self, form: &LeadForm) -> Result<(), TransportError> {
        self.submissions.lock().unwrap().push(form.clone());
        match self.failures.lock().unwrap().pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

// ============================================================================
// Test Runtime
// ============================================================================

pub type TestRuntime = ConversationRuntime<Arc<MockChatClient>, Arc<MockLeadSink>>;

/// Build a runtime over shared mocks. The returned sender feeds `run()`.
pub fn test_runtime(
    chat: &Arc<MockChatClient>,
    sink: &Arc<MockLeadSink>,
) -> (TestRuntime, mpsc::Sender<String>, broadcast::Receiver<Message>) {
    let (input_tx, input_rx) = mpsc::channel(32);
    let (broadcast_tx, broadcast_rx) = broadcast::channel(128);
    let runtime = ConversationRuntime::new(chat.clone(), sink.clone(), input_rx, broadcast_tx);
    (runtime, input_tx, broadcast_rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Sender;
    use crate::lead::{LeadField, LeadStep};
    use crate::state_machine::transition::{
        CHAT_FAILURE, GREETING, LEAD_SUBMISSION_FAILED, LEAD_SUBMITTED,
    };
    use crate::state_machine::{Phase, TransitionError};

    fn mocks() -> (Arc<MockChatClient>, Arc<MockLeadSink>) {
        (Arc::new(MockChatClient::new()), Arc::new(MockLeadSink::new()))
    }

    fn texts(rt: &TestRuntime) -> Vec<(Sender, String)> {
        rt.log()
            .messages()
            .iter()
            .map(|m| (m.sender(), m.text()))
            .collect()
    }

    /// Started runtime that has just activated lead collection
    async fn collecting_runtime(
        chat: &Arc<MockChatClient>,
        sink: &Arc<MockLeadSink>,
    ) -> TestRuntime {
        chat.queue_reply("Sure, let me get your details", true);
        let (mut rt, _tx, _rx) = test_runtime(chat, sink);
        rt.start().await.unwrap();
        rt.handle_user_input("I need pricing info").await.unwrap();
        rt
    }

    #[tokio::test]
    async fn test_mock_chat_client() {
        let mock = MockChatClient::new();
        mock.queue_reply("Hello", false);

        let response = mock.send(&ChatRequest::new("hi")).await.unwrap();
        assert_eq!(response.reply, "Hello");

        // Second call should fail (no more responses)
        assert!(mock.send(&ChatRequest::new("again")).await.is_err());
        assert_eq!(mock.recorded_queries(), ["hi", "again"]);
    }

    #[tokio::test]
    async fn fresh_session_logs_only_the_greeting() {
        let (chat, sink) = mocks();
        let (mut rt, _tx, mut rx) = test_runtime(&chat, &sink);

        rt.start().await.unwrap();

        assert_eq!(texts(&rt), [(Sender::Assistant, GREETING.to_string())]);
        assert_eq!(rx.recv().await.unwrap().text(), GREETING);
        assert!(chat.recorded_queries().is_empty());
    }

    #[tokio::test]
    async fn input_before_start_is_rejected() {
        let (chat, sink) = mocks();
        let (mut rt, _tx, _rx) = test_runtime(&chat, &sink);

        let err = rt.handle_user_input("hello").await.unwrap_err();
        assert!(matches!(err, TransitionError::NotStarted));
        assert!(rt.log().is_empty());
    }

    #[tokio::test]
    async fn requires_lead_info_routes_next_turn_to_name() {
        let (chat, sink) = mocks();
        let mut rt = collecting_runtime(&chat, &sink).await;

        assert_eq!(
            rt.log().last().unwrap().text(),
            "Sure, let me get your details"
        );
        assert_eq!(rt.state().lead.step(), LeadStep::Name);

        rt.handle_user_input("Jane Doe").await.unwrap();

        assert_eq!(chat.recorded_queries(), ["I need pricing info"]);
        assert_eq!(
            rt.state().lead.form().unwrap().get(LeadField::Name),
            Some("Jane Doe")
        );
        assert_eq!(
            rt.log().last().unwrap().text(),
            LeadField::Phone.prompt()
        );
    }

    #[tokio::test]
    async fn four_field_turns_submit_then_chat_resumes() {
        let (chat, sink) = mocks();
        let mut rt = collecting_runtime(&chat, &sink).await;

        for value in ["Jane Doe", "555-0100", "jane@example.com", "Manual reporting"] {
            rt.handle_user_input(value).await.unwrap();
        }

        assert_eq!(
            rt.log().last().unwrap().text(),
            LEAD_SUBMITTED
        );
        assert!(!rt.state().is_collecting());
        assert_eq!(rt.state().phase, Phase::Ready);

        let submissions = sink.recorded_submissions();
        assert_eq!(submissions.len(), 1);
        let form = &submissions[0];
        assert!(form.is_submitted());
        assert_eq!(form.get(LeadField::Name), Some("Jane Doe"));
        assert_eq!(form.get(LeadField::Phone), Some("555-0100"));
        assert_eq!(form.get(LeadField::Email), Some("jane@example.com"));
        assert_eq!(form.get(LeadField::PainPoints), Some("Manual reporting"));

        // Fifth turn goes back to the chat endpoint
        chat.queue_reply("Anything else?", false);
        rt.handle_user_input("thanks").await.unwrap();
        assert_eq!(chat.recorded_queries(), ["I need pricing info", "thanks"]);
        assert_eq!(rt.log().last().unwrap().text(), "Anything else?");
    }

    #[tokio::test]
    async fn chat_transport_failure_appends_one_error() {
        let (chat, sink) = mocks();
        let (mut rt, _tx, _rx) = test_runtime(&chat, &sink);
        rt.start().await.unwrap();
        let before = rt.state().clone();

        chat.queue_error(TransportError::network("Connection failed"));
        rt.handle_user_input("hello").await.unwrap();

        assert_eq!(
            texts(&rt),
            [
                (Sender::Assistant, GREETING.to_string()),
                (Sender::User, "hello".to_string()),
                (Sender::Assistant, CHAT_FAILURE.to_string()),
            ]
        );
        assert_eq!(rt.state(), &before);
        assert_eq!(chat.recorded_queries().len(), 1);
    }

    #[tokio::test]
    async fn submission_failure_does_not_rearm_collection() {
        let (chat, sink) = mocks();
        let mut rt = collecting_runtime(&chat, &sink).await;
        sink.queue_failure(TransportError::status(500, "database down"));

        for value in ["Jane Doe", "555-0100", "jane@example.com", "Manual reporting"] {
            rt.handle_user_input(value).await.unwrap();
        }

        assert_eq!(
            rt.log().last().unwrap().text(),
            LEAD_SUBMISSION_FAILED
        );
        assert!(!rt.state().is_collecting());
        assert_eq!(sink.recorded_submissions().len(), 1);

        chat.queue_reply("How else can I help?", false);
        rt.handle_user_input("ok").await.unwrap();
        assert_eq!(chat.recorded_queries().last().unwrap(), "ok");
    }

    #[tokio::test]
    async fn every_turn_appends_user_then_assistant() {
        let (chat, sink) = mocks();
        let mut rt = collecting_runtime(&chat, &sink).await;
        chat.queue_error(TransportError::timeout("Request timeout"));

        let turns = ["Jane Doe", "555-0100", "jane@example.com", "Manual reporting", "bye"];
        for turn in turns {
            rt.handle_user_input(turn).await.unwrap();
        }

        // Greeting, then user/assistant pairs for every turn including the
        // activation turn
        let senders: Vec<_> = rt.log().messages().iter().map(Message::sender).collect();
        assert_eq!(senders[0], Sender::Assistant);
        let pairs = &senders[1..];
        assert_eq!(pairs.len(), 2 * (turns.len() + 1));
        for pair in pairs.chunks(2) {
            assert_eq!(pair, [Sender::User, Sender::Assistant]);
        }

        let user_texts: Vec<_> = rt
            .log()
            .messages()
            .iter()
            .filter(|m| m.sender() == Sender::User)
            .map(Message::text)
            .collect();
        let mut expected = vec!["I need pricing info"];
        expected.extend(turns);
        assert_eq!(user_texts, expected);

        let timestamps: Vec<_> = rt.log().messages().iter().map(Message::timestamp).collect();
        assert!(timestamps.windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test]
    async fn run_processes_queued_input_in_order() {
        let (chat, sink) = mocks();
        chat.queue_reply("First answer", false);
        chat.queue_reply("Second answer", false);
        let (rt, tx, _rx) = test_runtime(&chat, &sink);

        // Both inputs are queued before the runtime starts
        tx.send("first".to_string()).await.unwrap();
        tx.send("second".to_string()).await.unwrap();
        drop(tx);

        let log = rt.run().await;
        let all: Vec<_> = log.messages().iter().map(Message::text).collect();
        assert_eq!(
            all,
            [GREETING, "first", "First answer", "second", "Second answer"]
        );
        assert_eq!(chat.recorded_queries(), ["first", "second"]);
    }
}
