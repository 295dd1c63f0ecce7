//! Typed clients for the backend services this proxy mediates.
//!
//! One client per backend capability. Each owns exactly its base URL,
//! endpoint path, HTTP method and body shape — no retries, no caching,
//! a single attempt per call. Every outbound call is bounded by a
//! per-request deadline; exceeding it surfaces as `UpstreamError::Timeout`
//! and is handled by the routes exactly like a connection failure.

pub mod gateway;
pub mod ingest;
pub mod llm;
pub mod rag;
pub mod search;
pub mod solver;

pub use gateway::GatewayClient;
pub use ingest::IngestClient;
pub use llm::CompletionClient;
pub use rag::RagClient;
pub use search::SearchClient;
pub use solver::SolverClient;

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

/// Failure taxonomy surfaced to the proxy routes.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The endpoint could not be reached (DNS, refused, reset).
    #[error("cannot reach {url}: {detail}")]
    Connection { url: String, detail: String },
    /// Deadline exceeded before any response arrived.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    /// A response arrived with a non-2xx status. `body` is forwarded
    /// verbatim to the client in the error envelope's `details`.
    #[error("upstream returned {status}")]
    Status { status: u16, body: String },
    /// A 2xx response whose body could not be parsed as JSON.
    #[error("unreadable upstream response: {0}")]
    InvalidResponse(String),
}

/// Map a `reqwest` send error onto the failure taxonomy.
pub(crate) fn classify_send_error(
    url: &str,
    timeout: Duration,
    e: reqwest::Error,
) -> UpstreamError {
    if e.is_timeout() {
        UpstreamError::Timeout(timeout)
    } else {
        UpstreamError::Connection {
            url: url.to_string(),
            detail: e.to_string(),
        }
    }
}

/// POST a JSON body and parse the JSON response.
pub(crate) async fn post_json<B: Serialize + ?Sized>(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
    body: &B,
) -> Result<Value, UpstreamError> {
    let response = client
        .post(url)
        .timeout(timeout)
        .json(body)
        .send()
        .await
        .map_err(|e| classify_send_error(url, timeout, e))?;

    read_json(response).await
}

/// Check the status and parse the body of an upstream response.
///
/// Non-2xx responses become `UpstreamError::Status` with the raw body
/// text so routes can mirror the upstream's status and details.
pub(crate) async fn read_json(response: reqwest::Response) -> Result<Value, UpstreamError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(UpstreamError::Status {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json()
        .await
        .map_err(|e| UpstreamError::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn refused_connection_classifies_as_connection() {
        // Bind then drop a listener so the port is known-refused.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/api/v1/chat", listener.local_addr().unwrap());
        drop(listener);

        let client = reqwest::Client::new();
        let err = post_json(
            &client,
            &url,
            Duration::from_secs(5),
            &serde_json::json!({"message": "hi"}),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, UpstreamError::Connection { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn stalled_upstream_classifies_as_timeout() {
        use axum::routing::post;

        let app = axum::Router::new().route(
            "/slow",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                "late"
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/slow", listener.local_addr().unwrap());
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = reqwest::Client::new();
        let err = post_json(
            &client,
            &url,
            Duration::from_millis(100),
            &serde_json::json!({}),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, UpstreamError::Timeout(_)), "{err:?}");
        server.abort();
    }
}
