//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::transition::*;
use super::*;
use crate::classifier::ClassifierError;
use crate::conversation::{ConversationStore, Message, MoodTag, Sender};
use proptest::prelude::*;
use serde_json::{json, Value};

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_mood() -> impl Strategy<Value = MoodTag> {
    proptest::sample::select(MoodTag::ALL.to_vec())
}

fn arb_valid_payload() -> impl Strategy<Value = Value> {
    (
        "[A-Za-z]{1,10}",
        proptest::collection::btree_map("[A-Za-z]{1,8}", 0.0f64..=1.0, 1..6),
        "[a-zA-Z .]{0,30}",
        "[a-zA-Z0-9:|. ]{0,80}",
    )
        .prop_map(|(class, probs, advice, explanation)| {
            json!({
                "predicted_class": class,
                "prediction_probs": probs,
                "advice": advice,
                "explanation": explanation,
            })
        })
}

fn arb_malformed_payload() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(json!({"prediction_probs": {}})),
        Just(json!({
            "predicted_class": "x",
            "prediction_probs": {},
            "advice": "a",
            "explanation": "b"
        })),
        Just(json!({
            "predicted_class": "x",
            "prediction_probs": {"x": "high"},
            "advice": "a",
            "explanation": "b"
        })),
        Just(json!({"error": "model not loaded"})),
        Just(Value::Null),
    ]
}

fn arb_outcome() -> impl Strategy<Value = Result<Value, ClassifierError>> {
    prop_oneof![
        arb_valid_payload().prop_map(Ok),
        arb_malformed_payload().prop_map(Ok),
        "[a-zA-Z ]{1,30}".prop_map(|m| Err(ClassifierError::transport(m))),
    ]
}

fn arb_submit_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z ]{1,40}",
        Just(String::new()),
        "[ \t\n]{1,5}",
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        arb_submit_text().prop_map(|text| Event::UserSubmit { text }),
        (arb_outcome(), arb_mood()).prop_map(|(outcome, mood)| Event::ClassifierResponse {
            outcome,
            mood
        }),
        (1u64..10).prop_map(|id| Event::ToggleExpanded { id }),
    ]
}

/// Apply effects the way the runtime does, returning appended messages
fn apply(store: &mut ConversationStore, effects: Vec<Effect>) -> Vec<Message> {
    let mut appended = vec![];
    for effect in effects {
        match effect {
            Effect::AppendMessage { message } => {
                store.append(message.clone());
                appended.push(message);
            }
            Effect::ToggleExpanded { id } => store.toggle_expanded(id),
            Effect::RequestClassification { .. }
            | Effect::NotifyBusy { .. }
            | Effect::ReportFailure { .. } => {}
        }
    }
    appended
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    // Ids strictly increase and every accepted submit is answered by one bot reply
    #[test]
    fn prop_ids_strictly_increase(events in proptest::collection::vec(arb_event(), 0..30)) {
        let mut store = ConversationStore::with_greeting();
        let mut state = ExchangeState::Idle;

        for event in events {
            let context = ExchangeContext::new(store.next_id());
            if let Ok(result) = transition(&state, &context, event) {
                state = result.new_state;
                apply(&mut store, result.effects);
            }
        }

        let ids: Vec<u64> = store.messages().iter().map(|m| m.id).collect();
        prop_assert!(ids.windows(2).all(|w| w[0] < w[1]), "ids not increasing: {:?}", ids);
        for (index, message) in store.messages().iter().enumerate() {
            prop_assert_eq!(message.id, index as u64 + 1);
        }
    }

    // Rejected events leave state untouched; accepted busy-flag changes are announced
    #[test]
    fn prop_busy_flag_is_announced(events in proptest::collection::vec(arb_event(), 0..30)) {
        let mut store = ConversationStore::new();
        let mut state = ExchangeState::Idle;

        for event in events {
            let context = ExchangeContext::new(store.next_id());
            if let Ok(result) = transition(&state, &context, event) {
                if result.new_state.is_busy() != state.is_busy() {
                    let expected = Effect::NotifyBusy { busy: result.new_state.is_busy() };
                    prop_assert!(result.effects.contains(&expected));
                }
                state = result.new_state;
                apply(&mut store, result.effects);
            }
        }
    }

    // A full exchange adds exactly one user message then one bot message
    #[test]
    fn prop_exchange_appends_two(text in "[a-zA-Z]{1,20}[a-zA-Z ]{0,20}", outcome in arb_outcome(), mood in arb_mood()) {
        let mut store = ConversationStore::with_greeting();
        let before = store.len();

        let submit = transition(&ExchangeState::Idle, &ExchangeContext::new(store.next_id()), Event::UserSubmit { text: text.clone() }).unwrap();
        prop_assert!(submit.new_state.is_busy());
        let first = apply(&mut store, submit.effects);
        prop_assert_eq!(first, vec![Message::user_text(before as u64 + 1, text)]);

        let reply = transition(&submit.new_state, &ExchangeContext::new(store.next_id()), Event::ClassifierResponse { outcome, mood }).unwrap();
        prop_assert_eq!(reply.new_state, ExchangeState::Idle);
        let second = apply(&mut store, reply.effects);
        prop_assert_eq!(second.len(), 1);
        prop_assert_eq!(second[0].sender, Sender::Bot);
        prop_assert_eq!(second[0].id, before as u64 + 2);
        prop_assert_eq!(store.len(), before + 2);
    }

    // Failure outcomes always produce the supportive fallback
    #[test]
    fn prop_failures_produce_fallback(payload in arb_malformed_payload(), mood in arb_mood()) {
        let state = ExchangeState::AwaitingResponse { user_message_id: 2 };
        let result = transition(&state, &ExchangeContext::new(3), Event::ClassifierResponse { outcome: Ok(payload), mood }).unwrap();
        prop_assert!(result.effects.contains(&Effect::append(Message::fallback(3))));
    }

    // Blank input never changes anything
    #[test]
    fn prop_blank_submit_rejected(text in "[ \t\n]{0,10}") {
        let result = transition(&ExchangeState::Idle, &ExchangeContext::new(1), Event::UserSubmit { text });
        prop_assert!(matches!(result, Err(TransitionError::EmptyInput)));
    }

    // Toggling the same id twice ends with nothing expanded, unless it started expanded
    #[test]
    fn prop_double_toggle_collapses(initial in proptest::option::of(1u64..10), id in 1u64..10) {
        let mut store = ConversationStore::with_greeting();
        if let Some(first) = initial {
            store.toggle_expanded(first);
        }

        for _ in 0..2 {
            let result = transition(&ExchangeState::Idle, &ExchangeContext::new(store.next_id()), Event::ToggleExpanded { id }).unwrap();
            apply(&mut store, result.effects);
            prop_assert!(store.expanded().is_none() || store.expanded() == Some(id));
        }

        let expected = if initial == Some(id) { Some(id) } else { None };
        prop_assert_eq!(store.expanded(), expected);
    }
}
