use designer_client::DesignRequest;
use designer_types::{Attachment, Message};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pipeline::InFlight;

/// Lifecycle of one submit → reply cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExchangeState {
    Idle,
    Submitted,
    Awaiting,
    SettledSuccess,
    SettledFailure,
}

impl ExchangeState {
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::SettledSuccess | Self::SettledFailure)
    }
}

/// One exchange, addressed to the thread that was active when it was submitted
///
/// Move-only. While in flight it owns the gate slot of its thread; dropping it
/// before it settles turns the placeholder into the failure notice.
#[derive(Debug)]
pub struct Exchange {
    id: Uuid,
    thread_id: String,
    text: String,
    attachments: Vec<Attachment>,
    state: ExchangeState,
    terminal: Option<Message>,
    in_flight: Option<InFlight>,
}

impl Exchange {
    pub(crate) fn new(thread_id: impl Into<String>, text: String, attachments: Vec<Attachment>) -> Self {
        Self {
            id: Uuid::new_v4(),
            thread_id: thread_id.into(),
            text,
            attachments,
            state: ExchangeState::Idle,
            terminal: None,
            in_flight: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn thread_id(&self) -> &str {
        &self.thread_id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn state(&self) -> ExchangeState {
        self.state
    }

    /// Message that replaced the placeholder, once settled
    pub fn terminal_message(&self) -> Option<&Message> {
        self.terminal.as_ref()
    }

    /// The user message recorded for this submission
    pub(crate) fn user_message(&self) -> Message {
        Message::user_with_attachments(self.text.clone(), self.attachments.clone())
    }

    /// Idle → Submitted
    pub(crate) fn mark_submitted(&mut self) {
        self.advance(ExchangeState::Idle, ExchangeState::Submitted);
    }

    pub(crate) fn hold(&mut self, in_flight: InFlight) {
        self.in_flight = Some(in_flight);
    }

    pub(crate) fn take_in_flight(&mut self) -> Option<InFlight> {
        self.in_flight.take()
    }

    /// Submitted → Awaiting, yielding the request for the remote client
    pub(crate) fn start_awaiting(&mut self) -> DesignRequest {
        self.advance(ExchangeState::Submitted, ExchangeState::Awaiting);
        DesignRequest::new(self.text.clone()).with_attachments(self.attachments.clone())
    }

    /// Awaiting → Settled-*, yielding the message that replaces the placeholder
    pub(crate) fn settle(&mut self, reply: anyhow::Result<String>) -> Message {
        let message = match reply {
            Ok(text) => {
                self.advance(ExchangeState::Awaiting, ExchangeState::SettledSuccess);
                Message::assistant(text)
            }
            Err(_) => {
                self.advance(ExchangeState::Awaiting, ExchangeState::SettledFailure);
                Message::failure_notice()
            }
        };
        self.terminal = Some(message.clone());
        message
    }

    fn advance(&mut self, from: ExchangeState, to: ExchangeState) {
        debug_assert_eq!(self.state, from, "illegal exchange transition to {:?}", to);
        self.state = to;
    }
}
