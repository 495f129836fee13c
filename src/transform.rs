//! Classification payload to chat message transformation
//!
//! Everything here is pure: the only non-deterministic input, the mood, is
//! supplied by the caller through a [`MoodPicker`].

mod mood;

#[cfg(test)]
mod proptests;

pub use mood::{FixedMood, MoodPicker, RandomMood};

use crate::conversation::{PredictionBody, Probability};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Tokens must be longer than this many characters to count as keywords
const KEYWORD_MIN_CHARS: usize = 5;
const MAX_KEYWORDS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("invalid classification payload: {0}")]
    InvalidPayload(String),
}

impl TransformError {
    fn invalid(message: impl Into<String>) -> Self {
        TransformError::InvalidPayload(message.into())
    }
}

/// A validated classifier response
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationPayload {
    pub predicted_class: String,
    /// Label and probability in `[0, 1]`, in the order received
    pub prediction_probs: Vec<(String, f64)>,
    pub advice: String,
    pub explanation: String,
}

#[derive(Deserialize)]
struct RawPayload {
    predicted_class: String,
    prediction_probs: Map<String, Value>,
    advice: String,
    explanation: String,
}

impl ClassificationPayload {
    /// Validate a raw JSON response.
    ///
    /// Missing or mistyped fields and non-numeric or out-of-range
    /// probabilities are rejected. Emptiness of `prediction_probs` is checked
    /// by [`transform`], not here.
    pub fn from_value(value: Value) -> Result<Self, TransformError> {
        let raw: RawPayload =
            serde_json::from_value(value).map_err(|e| TransformError::invalid(e.to_string()))?;

        let prediction_probs = raw
            .prediction_probs
            .into_iter()
            .map(|(label, prob)| {
                let p = prob.as_f64().ok_or_else(|| {
                    TransformError::invalid(format!("probability for '{label}' is not a number"))
                })?;
                if !(0.0..=1.0).contains(&p) {
                    return Err(TransformError::invalid(format!(
                        "probability for '{label}' out of range: {p}"
                    )));
                }
                Ok((label, p))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            predicted_class: raw.predicted_class,
            prediction_probs,
            advice: raw.advice,
            explanation: raw.explanation,
        })
    }
}

/// Build the display model for a classification result
pub fn transform(
    payload: &ClassificationPayload,
    moods: &mut dyn MoodPicker,
) -> Result<PredictionBody, TransformError> {
    let max = payload
        .prediction_probs
        .iter()
        .map(|(_, p)| *p)
        .reduce(f64::max)
        .ok_or_else(|| TransformError::invalid("prediction_probs is empty"))?;

    let probabilities = payload
        .prediction_probs
        .iter()
        .map(|(label, p)| Probability {
            label: label.clone(),
            value: p * 100.0,
        })
        .collect();

    Ok(PredictionBody {
        prediction: payload.predicted_class.clone(),
        confidence: max * 100.0,
        probabilities,
        advice: payload.advice.clone(),
        explanation: payload.explanation.clone(),
        keywords: extract_keywords(&payload.explanation),
        mood: moods.pick(),
    })
}

/// Validate and transform in one step
pub fn transform_value(
    value: Value,
    moods: &mut dyn MoodPicker,
) -> Result<PredictionBody, TransformError> {
    let payload = ClassificationPayload::from_value(value)?;
    transform(&payload, moods)
}

/// First few long whitespace-separated tokens of `explanation`.
///
/// Tokens keep their punctuation and duplicates are kept.
pub fn extract_keywords(explanation: &str) -> Vec<String> {
    explanation
        .split_whitespace()
        .filter(|word| word.chars().count() > KEYWORD_MIN_CHARS)
        .take(MAX_KEYWORDS)
        .map(str::to_string)
        .collect()
}
