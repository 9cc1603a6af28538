use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Inference endpoint returned {0}")]
    Status(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),
}

/// Clause classification model: clause text in, output label index out.
#[async_trait]
pub trait ClauseModel: Send + Sync {
    async fn predict(&self, clause: &str) -> Result<usize, ModelError>;
}

/// Text-classification inference server reached over HTTP.
///
/// Expects the `[{"label": "LABEL_3", "score": 0.97}, ...]` response shape
/// produced by sequence-classification serving stacks.
pub struct HttpModel {
    http: Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    label: String,
    score: f64,
}

impl HttpModel {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ModelError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }
}

/// Pick the highest-scoring prediction and parse its `LABEL_<n>` index.
fn best_label_index(predictions: &[Prediction]) -> Result<usize, ModelError> {
    let best = predictions
        .iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .ok_or_else(|| ModelError::InvalidResponse("empty prediction list".to_string()))?;

    best.label
        .strip_prefix("LABEL_")
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| ModelError::InvalidResponse(format!("unexpected label {}", best.label)))
}

#[async_trait]
impl ClauseModel for HttpModel {
    async fn predict(&self, clause: &str) -> Result<usize, ModelError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header("User-Agent", "clause-checkr/0.1.0")
            .json(&serde_json::json!({ "inputs": clause, "truncate": true }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ModelError::Status(response.status().as_u16()));
        }

        let predictions: Vec<Prediction> = response.json().await?;
        best_label_index(&predictions)
    }
}

#[cfg(test)]
pub mod mock {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Model double: returns a fixed index, or fails every call.
    pub struct ScriptedModel {
        index: Option<usize>,
        calls: AtomicUsize,
    }

    impl ScriptedModel {
        pub fn predicting(index: usize) -> Self {
            Self {
                index: Some(index),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn failing() -> Self {
            Self {
                index: None,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ClauseModel for ScriptedModel {
        async fn predict(&self, _clause: &str) -> Result<usize, ModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            // yield so concurrent callers can observe the same first failure
            tokio::task::yield_now().await;
            self.index
                .ok_or_else(|| ModelError::InvalidResponse("model unavailable".to_string()))
        }
    }
}
