//! Current-affairs web-search client.
//!
//! Searches are restricted to a fixed allow-list of trusted UPSC
//! sources; callers may narrow it but the default covers all four.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use super::{post_json, UpstreamError};

/// Trusted sources: The Hindu, PIB, Indian Express, PRS India.
pub const TRUSTED_SOURCES: &[&str] = &["the_hindu", "pib", "indian_express", "prs_india"];

/// Results requested per search.
pub const MAX_RESULTS: u32 = 5;

#[derive(Debug, Clone)]
pub struct SearchClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

#[derive(Serialize)]
struct WebSearchBody<'a> {
    query: &'a str,
    sources: &'a [String],
    max_results: u32,
}

impl SearchClient {
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

    /// `POST /api/current-affairs/web-search`.
    pub async fn web_search(
        &self,
        query: &str,
        sources: &[String],
    ) -> Result<Value, UpstreamError> {
        let url = format!("{}/api/current-affairs/web-search", self.base_url);
        let body = WebSearchBody {
            query,
            sources,
            max_results: MAX_RESULTS,
        };
        post_json(&self.client, &url, self.timeout, &body).await
    }
}

/// The default allow-list as owned strings, for defaulting request fields.
pub fn default_sources() -> Vec<String> {
    TRUSTED_SOURCES.iter().map(|s| s.to_string()).collect()
}
