//! Classifier error types

use crate::transform::TransformError;
use thiserror::Error;

/// Failure of one classification exchange
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ClassifierError {
    pub kind: ClassifierErrorKind,
    pub message: String,
}

impl ClassifierError {
    pub fn new(kind: ClassifierErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ClassifierErrorKind::Transport, message)
    }

    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::new(ClassifierErrorKind::InvalidPayload, message)
    }
}

impl From<TransformError> for ClassifierError {
    fn from(err: TransformError) -> Self {
        match err {
            TransformError::InvalidPayload(message) => Self::invalid_payload(message),
        }
    }
}

/// Both kinds end the exchange the same way; the kind only feeds diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierErrorKind {
    /// Connection failure, timeout, non-2xx status or a non-JSON body
    Transport,
    /// JSON that does not have the classification shape
    InvalidPayload,
}

impl ClassifierErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::InvalidPayload => "invalid_payload",
        }
    }
}
