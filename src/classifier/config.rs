//! Classifier endpoint configuration

use std::time::Duration;

pub const DEFAULT_URL: &str = "http://127.0.0.1:5000/predict";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierConfig {
    /// Full URL of the predict endpoint
    pub url: String,
    pub timeout: Duration,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClassifierConfig {
    /// Reads `MINDFUL_CLASSIFIER_URL` and `MINDFUL_CLASSIFIER_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("MINDFUL_CLASSIFIER_URL").ok(),
            std::env::var("MINDFUL_CLASSIFIER_TIMEOUT_SECS").ok(),
        )
    }

    fn from_vars(url: Option<String>, timeout_secs: Option<String>) -> Self {
        let url = url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_URL.to_string());

        let timeout = timeout_secs
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs);

        Self { url, timeout }
    }
}
