//! Conversation exchange state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.

mod effect;
mod event;
mod state;
mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::{ExchangeContext, ExchangeState};
pub use transition::{transition, TransitionError, TransitionResult};
