//! Ordered message list and expansion selection

use super::message::{Message, MessageId};

/// Owns the conversation's messages and the single expanded-message selection.
///
/// Messages are append-only. The selection is held by id, so an id that no
/// message carries simply resolves to nothing.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    messages: Vec<Message>,
    expanded: Option<MessageId>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A conversation seeded with the greeting as message 1
    pub fn with_greeting() -> Self {
        let mut store = Self::new();
        store.append(Message::greeting(store.next_id()));
        store
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Id for the next message: one past the last id, or 1 when empty
    pub fn next_id(&self) -> MessageId {
        self.messages.last().map_or(1, |m| m.id + 1)
    }

    /// Clear the selection if `id` is expanded, otherwise make `id` the only
    /// expanded message.
    pub fn toggle_expanded(&mut self, id: MessageId) {
        if self.expanded == Some(id) {
            self.expanded = None;
        } else {
            self.expanded = Some(id);
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn expanded(&self) -> Option<MessageId> {
        self.expanded
    }

    pub fn is_expanded(&self, id: MessageId) -> bool {
        self.expanded == Some(id)
    }

    /// The expanded message, if the selection names one that exists
    pub fn expanded_message(&self) -> Option<&Message> {
        self.expanded.and_then(|id| self.get(id))
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
