//! Property tests for the response transformer

use super::*;
use crate::conversation::MoodTag;
use proptest::prelude::*;

fn arb_mood() -> impl Strategy<Value = MoodTag> {
    proptest::sample::select(MoodTag::ALL.to_vec())
}

fn arb_probs() -> impl Strategy<Value = Vec<(String, f64)>> {
    proptest::collection::vec(("[A-Za-z]{1,12}", 0.0f64..=1.0), 1..8).prop_map(|pairs| {
        // labels are map keys, so keep the first occurrence of each
        let mut seen = std::collections::HashSet::new();
        pairs
            .into_iter()
            .filter(|(label, _)| seen.insert(label.clone()))
            .collect()
    })
}

fn arb_payload() -> impl Strategy<Value = ClassificationPayload> {
    (
        "[A-Za-z]{1,12}",
        arb_probs(),
        "[a-zA-Z .]{0,40}",
        "[a-zA-Z0-9:|,. \t]{0,120}",
    )
        .prop_map(
            |(predicted_class, prediction_probs, advice, explanation)| ClassificationPayload {
                predicted_class,
                prediction_probs,
                advice,
                explanation,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_confidence_is_max_probability(payload in arb_payload(), mood in arb_mood()) {
        let body = transform(&payload, &mut FixedMood(mood)).unwrap();
        let max = body
            .probabilities
            .iter()
            .map(|p| p.value)
            .fold(f64::NEG_INFINITY, f64::max);
        prop_assert!((body.confidence - max).abs() < 1e-9);
        prop_assert!((0.0..=100.0).contains(&body.confidence));
        prop_assert_eq!(body.mood, mood);
    }

    #[test]
    fn prop_probabilities_mirror_input(payload in arb_payload()) {
        let body = transform(&payload, &mut FixedMood(MoodTag::Calm)).unwrap();
        prop_assert_eq!(body.probabilities.len(), payload.prediction_probs.len());
        for (out, (label, p)) in body.probabilities.iter().zip(&payload.prediction_probs) {
            prop_assert_eq!(&out.label, label);
            prop_assert!((out.value - p * 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn prop_keywords_are_ordered_long_tokens(explanation in "[a-zA-Z0-9:|,. \t\n]{0,200}") {
        let keywords = extract_keywords(&explanation);
        prop_assert!(keywords.len() <= MAX_KEYWORDS);

        let long_tokens: Vec<&str> = explanation
            .split_whitespace()
            .filter(|t| t.chars().count() > KEYWORD_MIN_CHARS)
            .collect();
        let expected: Vec<&str> = long_tokens.iter().take(MAX_KEYWORDS).copied().collect();
        prop_assert_eq!(keywords, expected);
    }

    #[test]
    fn prop_transform_is_deterministic_given_mood(payload in arb_payload()) {
        let a = transform(&payload, &mut FixedMood(MoodTag::Friendly)).unwrap();
        let b = transform(&payload, &mut FixedMood(MoodTag::Friendly)).unwrap();
        prop_assert_eq!(a, b);
    }
}
