//! Exchange state types

use crate::conversation::MessageId;
use serde::{Deserialize, Serialize};

/// Where the conversation is in its request/response cycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExchangeState {
    /// Ready for user input
    #[default]
    Idle,

    /// User message appended, classifier call in flight
    AwaitingResponse { user_message_id: MessageId },
}

impl ExchangeState {
    /// The busy flag: true while a classifier call is outstanding
    pub fn is_busy(&self) -> bool {
        matches!(self, ExchangeState::AwaitingResponse { .. })
    }
}

/// Read-only facts about the conversation a transition needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeContext {
    /// Id the next appended message will carry
    pub next_id: MessageId,
}

impl ExchangeContext {
    pub fn new(next_id: MessageId) -> Self {
        Self { next_id }
    }
}
