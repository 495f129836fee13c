//! Remote classification service boundary

mod config;
mod error;
mod http;

pub use config::ClassifierConfig;
pub use error::{ClassifierError, ClassifierErrorKind};
pub use http::HttpClassifier;

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Sends user text to a classifier and returns its raw JSON answer.
///
/// Implementations report connection problems, bad statuses and non-JSON
/// bodies as [`ClassifierErrorKind::Transport`]. Checking the payload shape is
/// left to the transformer.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<Value, ClassifierError>;

    /// Where requests go, for diagnostics
    fn endpoint(&self) -> &str;
}

#[async_trait]
impl<T: Classifier + ?Sized> Classifier for Arc<T> {
    async fn classify(&self, text: &str) -> Result<Value, ClassifierError> {
        (**self).classify(text).await
    }

    fn endpoint(&self) -> &str {
        (**self).endpoint()
    }
}

/// Logging wrapper for classifiers
pub struct LoggingClassifier<C> {
    inner: C,
}

impl<C: Classifier> LoggingClassifier<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C: Classifier> Classifier for LoggingClassifier<C> {
    async fn classify(&self, text: &str) -> Result<Value, ClassifierError> {
        let start = std::time::Instant::now();
        let result = self.inner.classify(text).await;
        let duration = start.elapsed();

        match &result {
            Ok(_) => {
                tracing::info!(
                    endpoint = %self.inner.endpoint(),
                    duration_ms = %duration.as_millis(),
                    input_chars = text.chars().count(),
                    "Classification request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    endpoint = %self.inner.endpoint(),
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    kind = e.kind.as_str(),
                    "Classification request failed"
                );
            }
        }

        result
    }

    fn endpoint(&self) -> &str {
        self.inner.endpoint()
    }
}
