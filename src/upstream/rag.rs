//! RAG query service client.

use std::time::Duration;

use serde_json::Value;

use super::{classify_send_error, post_json, read_json, UpstreamError};

#[derive(Debug, Clone)]
pub struct RagClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl RagClient {
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

    /// `POST /api/rag/query-with-llm` — retrieval + optional generation.
    ///
    /// The payload is the validated, defaulted query with any unknown
    /// client fields still intact.
    pub async fn query_with_llm(&self, payload: &Value) -> Result<Value, UpstreamError> {
        let url = format!("{}/api/rag/query-with-llm", self.base_url);
        post_json(&self.client, &url, self.timeout, payload).await
    }

    /// GET passthrough for read-only RAG endpoints (`health`,
    /// `api/rag/collections`, ...). Absolute URLs are used as-is.
    pub async fn get(&self, endpoint: &str) -> Result<Value, UpstreamError> {
        let url = if endpoint.starts_with("http") {
            endpoint.to_string()
        } else {
            format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
        };

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| classify_send_error(&url, self.timeout, e))?;

        read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_endpoint_joins_base_url() {
        let client = RagClient::new(
            "http://localhost:8005/",
            reqwest::Client::new(),
            Duration::from_secs(1),
        );
        assert_eq!(client.base_url(), "http://localhost:8005");
    }
}
