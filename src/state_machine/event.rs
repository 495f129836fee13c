//! Events that can occur in a conversation

use crate::classifier::ClassifierError;
use crate::conversation::{MessageId, MoodTag};
use serde_json::Value;

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    // User events
    UserSubmit {
        text: String,
    },
    ToggleExpanded {
        id: MessageId,
    },

    // Classifier events
    ClassifierResponse {
        outcome: Result<Value, ClassifierError>,
        /// Mood drawn for the reply when the request was issued
        mood: MoodTag,
    },
}

impl Event {
    pub fn submit(text: impl Into<String>) -> Self {
        Event::UserSubmit { text: text.into() }
    }
}
