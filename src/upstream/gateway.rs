//! API gateway client — chat and handwriting evaluation.
//!
//! The gateway fronts the RAG pipeline and the OCR/evaluation pipeline
//! behind `/api/v1/*`. The proxy forwards to it without touching the
//! response body; normalization happens route-side.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use super::{classify_send_error, post_json, read_json, UpstreamError};

#[derive(Debug, Clone)]
pub struct GatewayClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl GatewayClient {
    pub fn new(base_url: &str, client: reqwest::Client, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /api/v1/chat` — forward a validated chat request.
    pub async fn chat<B: Serialize>(&self, body: &B) -> Result<Value, UpstreamError> {
        let url = format!("{}/api/v1/chat", self.base_url);
        post_json(&self.client, &url, self.timeout, body).await
    }

    /// `POST /api/v1/evaluate-handwritten` — forward a handwritten answer
    /// sheet (multipart: `file`, `question`, `marks`) for OCR + evaluation.
    pub async fn evaluate_handwritten(
        &self,
        form: reqwest::multipart::Form,
    ) -> Result<Value, UpstreamError> {
        let url = format!("{}/api/v1/evaluate-handwritten", self.base_url);
        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .multipart(form)
            .send()
            .await
            .map_err(|e| classify_send_error(&url, self.timeout, e))?;

        read_json(response).await
    }
}
