//! Chat message types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned to each message in emission order, starting at 1
pub type MessageId = u64;

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

/// Cosmetic annotation on bot messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodTag {
    Supportive,
    Thoughtful,
    Encouraging,
    Calm,
    Energetic,
    Friendly,
}

impl MoodTag {
    pub const ALL: [MoodTag; 6] = [
        MoodTag::Supportive,
        MoodTag::Thoughtful,
        MoodTag::Encouraging,
        MoodTag::Calm,
        MoodTag::Energetic,
        MoodTag::Friendly,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MoodTag::Supportive => "supportive",
            MoodTag::Thoughtful => "thoughtful",
            MoodTag::Encouraging => "encouraging",
            MoodTag::Calm => "calm",
            MoodTag::Energetic => "energetic",
            MoodTag::Friendly => "friendly",
        }
    }
}

impl fmt::Display for MoodTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the classifier's per-label distribution, scaled to percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Probability {
    pub label: String,
    /// Percentage in `[0, 100]`
    pub value: f64,
}

/// Display-ready classification result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionBody {
    pub prediction: String,
    /// Maximum of `probabilities`, in `[0, 100]`
    pub confidence: f64,
    /// In the order the classifier sent them
    pub probabilities: Vec<Probability>,
    pub advice: String,
    pub explanation: String,
    pub keywords: Vec<String>,
    pub mood: MoodTag,
}

impl PredictionBody {
    /// Probabilities sorted by descending value.
    ///
    /// The sort is stable, so equal values keep the order the classifier
    /// sent them in. The stored order is left untouched.
    pub fn ranked(&self) -> Vec<&Probability> {
        let mut ranked: Vec<&Probability> = self.probabilities.iter().collect();
        ranked.sort_by(|a, b| b.value.total_cmp(&a.value));
        ranked
    }
}

/// Message payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageBody {
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mood: Option<MoodTag>,
    },
    Prediction(PredictionBody),
}

impl MessageBody {
    pub fn mood(&self) -> Option<MoodTag> {
        match self {
            MessageBody::Text { mood, .. } => *mood,
            MessageBody::Prediction(p) => Some(p.mood),
        }
    }
}

/// A chat message. Immutable once appended to a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender: Sender,
    pub body: MessageBody,
}

pub const GREETING_TEXT: &str =
    "Hello! I'm here to chat with you about whatever's on your mind. How are you feeling today? 🌟";

pub const FALLBACK_TEXT: &str =
    "I apologize, but I'm having trouble connecting right now. Let's try again in a moment! 🌟";

impl Message {
    /// A user text message. User messages never carry a mood.
    pub fn user_text(id: MessageId, text: impl Into<String>) -> Self {
        Self {
            id,
            sender: Sender::User,
            body: MessageBody::Text {
                text: text.into(),
                mood: None,
            },
        }
    }

    pub fn bot_text(id: MessageId, text: impl Into<String>, mood: MoodTag) -> Self {
        Self {
            id,
            sender: Sender::Bot,
            body: MessageBody::Text {
                text: text.into(),
                mood: Some(mood),
            },
        }
    }

    pub fn prediction(id: MessageId, body: PredictionBody) -> Self {
        Self {
            id,
            sender: Sender::Bot,
            body: MessageBody::Prediction(body),
        }
    }

    /// Opening message of a fresh conversation
    pub fn greeting(id: MessageId) -> Self {
        Self::bot_text(id, GREETING_TEXT, MoodTag::Friendly)
    }

    /// Apology appended when an exchange fails
    pub fn fallback(id: MessageId) -> Self {
        Self::bot_text(id, FALLBACK_TEXT, MoodTag::Supportive)
    }

    pub fn is_prediction(&self) -> bool {
        matches!(self.body, MessageBody::Prediction(_))
    }
}
