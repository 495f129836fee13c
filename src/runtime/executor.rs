//! Conversation runtime executor

use super::{ChatEvent, ConversationView, CoordinatorHandle};
use crate::classifier::{Classifier, ClassifierError};
use crate::conversation::{ConversationStore, MoodTag};
use crate::state_machine::{transition, Effect, Event, ExchangeContext, ExchangeState, TransitionError};
use crate::transform::MoodPicker;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch};

const EVENT_CHANNEL_CAPACITY: usize = 32;
const BROADCAST_CAPACITY: usize = 128;

/// Owns the conversation and sequences exchanges against it.
///
/// Every mutation happens on the task running [`RequestCoordinator::run`].
/// Classifier calls run as background tasks that report back with
/// [`Event::ClassifierResponse`] on a channel the coordinator owns, so the
/// loop keeps handling events while a call is in flight and always sees the
/// reply, even after every handle is gone.
pub struct RequestCoordinator<C, M>
where
    C: Classifier + 'static,
    M: MoodPicker + 'static,
{
    state: ExchangeState,
    store: ConversationStore,
    classifier: Arc<C>,
    moods: M,
    /// Events from handles; closes once every handle is dropped
    event_rx: mpsc::Receiver<Event>,
    response_tx: mpsc::Sender<Event>,
    response_rx: mpsc::Receiver<Event>,
    broadcast_tx: broadcast::Sender<ChatEvent>,
    view_tx: watch::Sender<ConversationView>,
}

impl<C, M> RequestCoordinator<C, M>
where
    C: Classifier + 'static,
    M: MoodPicker + 'static,
{
    pub fn new(store: ConversationStore, classifier: C, moods: M) -> (Self, CoordinatorHandle) {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let (response_tx, response_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let (broadcast_tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        let initial_view = ConversationView {
            messages: store.messages().to_vec(),
            expanded: store.expanded(),
            busy: false,
        };
        let (view_tx, view_rx) = watch::channel(initial_view);

        let handle = CoordinatorHandle {
            event_tx,
            broadcast_tx: broadcast_tx.clone(),
            view_rx,
        };

        let coordinator = Self {
            state: ExchangeState::Idle,
            store,
            classifier: Arc::new(classifier),
            moods,
            event_rx,
            response_tx,
            response_rx,
            broadcast_tx,
            view_tx,
        };

        (coordinator, handle)
    }

    /// Start the coordinator on the current tokio runtime
    pub fn spawn(
        store: ConversationStore,
        classifier: C,
        moods: M,
    ) -> (CoordinatorHandle, tokio::task::JoinHandle<ConversationStore>) {
        let (coordinator, handle) = Self::new(store, classifier, moods);
        (handle, tokio::spawn(coordinator.run()))
    }

    /// Process events until every handle is dropped and no call is in flight.
    /// Submits already queued when the last handle drops are still run.
    /// Returns the final conversation.
    pub async fn run(mut self) -> ConversationStore {
        tracing::info!(
            endpoint = %self.classifier.endpoint(),
            messages = self.store.len(),
            "Starting conversation coordinator"
        );

        let mut handles_open = true;
        while handles_open || self.state.is_busy() {
            let event = tokio::select! {
                Some(event) = self.response_rx.recv() => event,
                received = self.event_rx.recv(), if handles_open => {
                    let Some(event) = received else {
                        tracing::debug!(busy = self.state.is_busy(), "All handles dropped");
                        handles_open = false;
                        continue;
                    };
                    event
                }
                else => break,
            };
            self.process_event(event);
        }

        tracing::info!(messages = self.store.len(), "Conversation coordinator stopped");
        self.store
    }

    fn process_event(&mut self, event: Event) {
        let context = ExchangeContext::new(self.store.next_id());
        let result = match transition(&self.state, &context, event) {
            Ok(r) => r,
            Err(e) => {
                self.reject(&e);
                return;
            }
        };

        self.state = result.new_state;

        for effect in result.effects {
            self.execute_effect(effect);
        }
    }

    fn reject(&self, err: &TransitionError) {
        match err {
            TransitionError::EmptyInput | TransitionError::Busy => {
                tracing::debug!(reason = %err, "Submit ignored");
                let _ = self.broadcast_tx.send(ChatEvent::rejected(err));
            }
            TransitionError::InvalidTransition(_) => {
                tracing::warn!(error = %err, state = ?self.state, "Dropping event");
            }
        }
    }

    fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::AppendMessage { message } => {
                tracing::debug!(
                    message_id = message.id,
                    sender = ?message.sender,
                    prediction = message.is_prediction(),
                    "Appending message"
                );
                self.store.append(message.clone());
                let _ = self.broadcast_tx.send(ChatEvent::MessageAppended { message });
                self.publish_view();
            }

            Effect::ToggleExpanded { id } => {
                self.store.toggle_expanded(id);
                let _ = self.broadcast_tx.send(ChatEvent::ExpansionChanged {
                    expanded: self.store.expanded(),
                });
                self.publish_view();
            }

            Effect::NotifyBusy { busy } => {
                let _ = self.broadcast_tx.send(ChatEvent::BusyChanged { busy });
                self.publish_view();
            }

            Effect::ReportFailure {
                user_message_id,
                error,
            } => {
                tracing::warn!(
                    user_message_id,
                    kind = error.kind.as_str(),
                    error = %error.message,
                    "Exchange failed, sending fallback reply"
                );
            }

            Effect::RequestClassification { text } => {
                let mood = self.moods.pick();
                self.spawn_classification(text, mood, self.response_tx.clone());
            }
        }
    }

    /// Run the classifier call in the background.
    ///
    /// The outer task always sends exactly one response event, even if the
    /// classifier panics, so the exchange can never stay busy.
    fn spawn_classification(&self, text: String, mood: MoodTag, response_tx: mpsc::Sender<Event>) {
        let classifier = Arc::clone(&self.classifier);

        tokio::spawn(async move {
            tracing::info!(input_chars = text.chars().count(), "Requesting classification");

            let call = tokio::spawn(async move { classifier.classify(&text).await });
            let outcome = match call.await {
                Ok(outcome) => outcome,
                Err(join_err) => {
                    tracing::error!(error = %join_err, "Classifier task did not complete");
                    Err(ClassifierError::transport(format!(
                        "Classifier task failed: {join_err}"
                    )))
                }
            };

            if response_tx
                .send(Event::ClassifierResponse { outcome, mood })
                .await
                .is_err()
            {
                tracing::warn!("Coordinator stopped before classification finished");
            }
        });
    }

    fn publish_view(&self) {
        self.view_tx.send_replace(ConversationView {
            messages: self.store.messages().to_vec(),
            expanded: self.store.expanded(),
            busy: self.state.is_busy(),
        });
    }
}
