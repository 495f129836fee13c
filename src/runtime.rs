//! Runtime for executing conversation exchanges
//!
//! A single [`RequestCoordinator`] task owns the conversation. Callers talk to
//! it through a cloneable [`CoordinatorHandle`].

mod executor;


pub use executor::RequestCoordinator;

use crate::conversation::{Message, MessageId};
use crate::state_machine::{Event, TransitionError};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, watch};

/// Snapshot of everything a front-end renders
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConversationView {
    pub messages: Vec<Message>,
    pub expanded: Option<MessageId>,
    pub busy: bool,
}

/// Incremental notifications for renderers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    MessageAppended { message: Message },
    BusyChanged { busy: bool },
    ExpansionChanged { expanded: Option<MessageId> },
    SubmitRejected { reason: String },
}

impl ChatEvent {
    fn rejected(err: &TransitionError) -> Self {
        ChatEvent::SubmitRejected {
            reason: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Conversation coordinator has stopped")]
pub struct CoordinatorClosed;

/// Handle to interact with a running coordinator
#[derive(Clone)]
pub struct CoordinatorHandle {
    event_tx: mpsc::Sender<Event>,
    broadcast_tx: broadcast::Sender<ChatEvent>,
    view_rx: watch::Receiver<ConversationView>,
}

impl CoordinatorHandle {
    /// Queue user text for an exchange.
    ///
    /// Blank text and text sent while an exchange is in flight are refused by
    /// the coordinator and reported as [`ChatEvent::SubmitRejected`].
    pub async fn submit(&self, text: impl Into<String>) -> Result<(), CoordinatorClosed> {
        self.send(Event::submit(text)).await
    }

    pub async fn toggle_expanded(&self, id: MessageId) -> Result<(), CoordinatorClosed> {
        self.send(Event::ToggleExpanded { id }).await
    }

    async fn send(&self, event: Event) -> Result<(), CoordinatorClosed> {
        self.event_tx.send(event).await.map_err(|_| CoordinatorClosed)
    }

    /// Current snapshot
    pub fn view(&self) -> ConversationView {
        self.view_rx.borrow().clone()
    }

    /// Receiver that is notified after every mutation
    pub fn watch(&self) -> watch::Receiver<ConversationView> {
        self.view_rx.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChatEvent> {
        self.broadcast_tx.subscribe()
    }

    pub fn is_busy(&self) -> bool {
        self.view_rx.borrow().busy
    }
}
