//! Pure state transition function

use super::{Effect, Event, ExchangeContext, ExchangeState};
use crate::classifier::ClassifierError;
use crate::conversation::Message;
use crate::transform::{transform_value, FixedMood};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ExchangeState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ExchangeState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Reasons an event is refused. A refused event changes nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Message is empty")]
    EmptyInput,
    #[error("Still waiting for the previous response")]
    Busy,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function.
///
/// Given the same inputs it always produces the same outputs; all I/O is
/// described by the returned effects.
pub fn transition(
    state: &ExchangeState,
    context: &ExchangeContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // Expansion is independent of the exchange cycle
        (_, Event::ToggleExpanded { id }) => {
            Ok(TransitionResult::new(*state).with_effect(Effect::ToggleExpanded { id }))
        }

        // Reentrancy guard: one exchange at a time
        (ExchangeState::AwaitingResponse { .. }, Event::UserSubmit { .. }) => {
            Err(TransitionError::Busy)
        }

        (ExchangeState::Idle, Event::UserSubmit { text }) => {
            if text.trim().is_empty() {
                return Err(TransitionError::EmptyInput);
            }

            let user_message_id = context.next_id;
            Ok(
                TransitionResult::new(ExchangeState::AwaitingResponse { user_message_id })
                    .with_effect(Effect::append(Message::user_text(
                        user_message_id,
                        text.clone(),
                    )))
                    .with_effect(Effect::NotifyBusy { busy: true })
                    .with_effect(Effect::request_classification(text)),
            )
        }

        // Success and failure both end in Idle with exactly one reply
        (
            ExchangeState::AwaitingResponse { user_message_id },
            Event::ClassifierResponse { outcome, mood },
        ) => {
            let reply_id = context.next_id;
            let prediction = outcome.and_then(|value| {
                transform_value(value, &mut FixedMood(mood)).map_err(ClassifierError::from)
            });

            let result = TransitionResult::new(ExchangeState::Idle);
            let result = match prediction {
                Ok(body) => result.with_effect(Effect::append(Message::prediction(reply_id, body))),
                Err(error) => result
                    .with_effect(Effect::ReportFailure {
                        user_message_id: *user_message_id,
                        error,
                    })
                    .with_effect(Effect::append(Message::fallback(reply_id))),
            };
            Ok(result.with_effect(Effect::NotifyBusy { busy: false }))
        }

        (ExchangeState::Idle, Event::ClassifierResponse { .. }) => Err(
            TransitionError::InvalidTransition("classifier response while idle".to_string()),
        ),
    }
}
