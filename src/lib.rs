//! Mindful Companion - chat front-end for a text classification service
//!
//! User text goes to a remote classifier; its answer comes back as an
//! expandable chat message. The conversation is driven by a pure state
//! machine and a single-owner coordinator task.

pub mod classifier;
pub mod conversation;
pub mod render;
pub mod runtime;
pub mod state_machine;
pub mod transform;

pub use classifier::{Classifier, ClassifierConfig, ClassifierError, HttpClassifier};
pub use conversation::{ConversationStore, Message, MessageBody, MoodTag};
pub use runtime::{ChatEvent, ConversationView, CoordinatorHandle, RequestCoordinator};
pub use transform::{transform, MoodPicker, RandomMood};
