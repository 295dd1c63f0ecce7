//! Process-wide configuration: upstream base URLs and route deadlines.
//!
//! Every upstream has an environment variable and a hard-coded development
//! fallback. Configuration is read once at startup into `UpstreamConfig`
//! and never mutated afterwards, so handlers can share it freely.

use std::time::Duration;

pub const APP_NAME: &str = "ignize-proxy";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Deadline for chat, query, completion, document and evaluation routes.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(120);
/// Deadline for the current-affairs web-search route.
pub const SEARCH_TIMEOUT: Duration = Duration::from_secs(60);

pub fn default_log_filter() -> String {
    "ignize_proxy=info,tower_http=warn".to_string()
}

/// Listen address for this service.
pub fn bind_addr() -> String {
    env_or("BIND_ADDR", "127.0.0.1:3000")
}

/// Base URLs for every upstream this service proxies to.
///
/// Read-only after startup. Trailing slashes are trimmed so endpoint
/// paths can be appended with a plain `format!`.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// API gateway: chat + handwriting evaluation.
    pub gateway_url: String,
    /// RAG query service.
    pub rag_url: String,
    /// Document/image ingestion service.
    pub doc_url: String,
    /// vLLM completion service (OpenAI-style API).
    pub vllm_url: String,
    /// Current-affairs web-search service.
    pub current_affairs_url: String,
    /// Evaluation/metrics backend (UPSC solver).
    pub solver_url: String,
    /// Deadline for chat/query/completion/document/evaluation calls.
    pub query_timeout: Duration,
    /// Deadline for web-search calls.
    pub search_timeout: Duration,
}

impl UpstreamConfig {
    /// Read all base URLs from the environment, falling back to the
    /// development default of each backend.
    pub fn from_env() -> Self {
        Self {
            gateway_url: env_or("GATEWAY_URL", "http://localhost:8080"),
            rag_url: env_or("RAG_API_URL", "http://172.206.201.162:8005"),
            doc_url: env_or("DOC_API_URL", "http://172.206.201.162:8004"),
            vllm_url: env_or("VLLM_URL", "http://172.206.201.162:8000"),
            current_affairs_url: env_or("CURRENT_AFFAIRS_URL", "http://172.206.201.162:8008"),
            solver_url: env_or("SOLVER_URL", "http://172.206.201.162:8080"),
            query_timeout: QUERY_TIMEOUT,
            search_timeout: SEARCH_TIMEOUT,
        }
    }

    /// All upstreams at one base URL with a short deadline.
    ///
    /// Used by router tests that point every client at a single mock
    /// server on `127.0.0.1:0`.
    #[cfg(test)]
    pub fn single_upstream(base_url: &str, timeout: Duration) -> Self {
        let url = base_url.trim_end_matches('/').to_string();
        Self {
            gateway_url: url.clone(),
            rag_url: url.clone(),
            doc_url: url.clone(),
            vllm_url: url.clone(),
            current_affairs_url: url.clone(),
            solver_url: url,
            query_timeout: timeout,
            search_timeout: timeout,
        }
    }
}

fn env_or(var: &str, default: &str) -> String {
    std::env::var(var)
        .unwrap_or_else(|_| default.to_string())
        .trim_end_matches('/')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_or_falls_back_to_default() {
        let url = env_or("IGNIZE_PROXY_TEST_UNSET_VAR", "http://localhost:9999");
        assert_eq!(url, "http://localhost:9999");
    }

    #[test]
    fn env_or_trims_trailing_slash() {
        let url = env_or("IGNIZE_PROXY_TEST_UNSET_VAR", "http://localhost:9999/");
        assert_eq!(url, "http://localhost:9999");
    }

    #[test]
    fn route_deadlines_match_contract() {
        assert_eq!(QUERY_TIMEOUT, Duration::from_secs(120));
        assert_eq!(SEARCH_TIMEOUT, Duration::from_secs(60));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
