//! Conversation model: messages and the store that orders them

mod message;
mod store;

pub use message::{
    Message, MessageBody, MessageId, MoodTag, PredictionBody, Probability, Sender, FALLBACK_TEXT,
    GREETING_TEXT,
};
pub use store::ConversationStore;
