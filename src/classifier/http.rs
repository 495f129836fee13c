//! HTTP classifier client

use super::{Classifier, ClassifierConfig, ClassifierError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    text: &'a str,
}

/// Posts `{"text": ...}` to the predict endpoint and returns the JSON body
pub struct HttpClassifier {
    client: Client,
    url: String,
}

impl HttpClassifier {
    pub fn new(config: &ClassifierConfig) -> Result<Self, ClassifierError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClassifierError::transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    fn request_error(err: &reqwest::Error) -> ClassifierError {
        if err.is_timeout() {
            ClassifierError::transport(format!("Request timed out: {err}"))
        } else if err.is_connect() {
            ClassifierError::transport(format!("Connection failed: {err}"))
        } else {
            ClassifierError::transport(format!("Request failed: {err}"))
        }
    }
}

/// Error for a non-2xx response, quoting the service's `error` field when present
fn status_error(status: StatusCode, body: &str) -> ClassifierError {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string());

    if detail.is_empty() {
        ClassifierError::transport(format!("Classifier returned {status}"))
    } else {
        ClassifierError::transport(format!("Classifier returned {status}: {detail}"))
    }
}

#[async_trait]
impl Classifier for HttpClassifier {
    async fn classify(&self, text: &str) -> Result<Value, ClassifierError> {
        let response = self
            .client
            .post(&self.url)
            .json(&ClassifyRequest { text })
            .send()
            .await
            .map_err(|e| Self::request_error(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Self::request_error(&e))?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| ClassifierError::transport(format!("Response is not JSON: {e}")))
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}
