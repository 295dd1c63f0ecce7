//! Document/image ingestion client.
//!
//! Documents and images share one upload endpoint; image-specific OCR
//! routing happens inside the ingestion service.

use std::time::Duration;

use serde_json::Value;

use super::{classify_send_error, read_json, UpstreamError};

#[derive(Debug, Clone)]
pub struct IngestClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl IngestClient {
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

    /// `POST /api/documents/upload` — forward a file as multipart.
    pub async fn upload(&self, form: reqwest::multipart::Form) -> Result<Value, UpstreamError> {
        let url = format!("{}/api/documents/upload", self.base_url);
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
