//! Evaluation/metrics backend client (UPSC solver).

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use super::{post_json, UpstreamError};

#[derive(Debug, Clone)]
pub struct SolverClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

#[derive(Serialize)]
struct EvaluateBody {
    limit: u64,
    batch_size: u64,
}

impl SolverClient {
    pub fn new(base_url: &str, client: reqwest::Client, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout,
        }
    }

    /// `POST /api/evaluate` — run a scored evaluation batch.
    pub async fn evaluate(&self, limit: u64, batch_size: u64) -> Result<Value, UpstreamError> {
        let url = format!("{}/api/evaluate", self.base_url);
        let body = EvaluateBody { limit, batch_size };
        post_json(&self.client, &url, self.timeout, &body).await
    }
}
