//! Effects produced by state transitions

use crate::classifier::ClassifierError;
use crate::conversation::{Message, MessageId};

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Append a message to the conversation
    AppendMessage { message: Message },

    /// Call the classifier (spawns as background task)
    RequestClassification { text: String },

    /// Toggle the expanded selection
    ToggleExpanded { id: MessageId },

    /// Tell observers the busy flag changed
    NotifyBusy { busy: bool },

    /// Log a failed exchange, keyed by the user message that started it
    ReportFailure {
        user_message_id: MessageId,
        error: ClassifierError,
    },
}

impl Effect {
    pub fn append(message: Message) -> Self {
        Effect::AppendMessage { message }
    }

    pub fn request_classification(text: impl Into<String>) -> Self {
        Effect::RequestClassification { text: text.into() }
    }
}
