//! vLLM completion client (OpenAI-style chat completions API).

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use super::{post_json, UpstreamError};

/// Model served by the vLLM instance.
const COMPLETION_MODEL: &str = "openai/gpt-oss-120b";

#[derive(Debug, Clone)]
pub struct CompletionClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<CompletionMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct CompletionMessage<'a> {
    role: &'a str,
    content: &'a str,
}

impl CompletionClient {
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

    /// `POST /v1/chat/completions` — raw passthrough for clients that
    /// speak the OpenAI shape themselves.
    pub async fn chat_completions(&self, body: &Value) -> Result<Value, UpstreamError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        post_json(&self.client, &url, self.timeout, body).await
    }

    /// One-shot completion with a system prompt. Used by the composed
    /// chat flow; extracts `choices[0].message.content` from the
    /// OpenAI-style response.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, UpstreamError> {
        let body = CompletionRequest {
            model: COMPLETION_MODEL,
            messages: vec![
                CompletionMessage {
                    role: "system",
                    content: system,
                },
                CompletionMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: 0.7,
            max_tokens: 1024,
        };

        let url = format!("{}/v1/chat/completions", self.base_url);
        let response = post_json(&self.client, &url, self.timeout, &body).await?;

        response["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| {
                UpstreamError::InvalidResponse(
                    "completion response missing choices[0].message.content".into(),
                )
            })
    }
}
