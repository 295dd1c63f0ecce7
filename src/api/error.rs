//! Route-level errors with structured JSON envelopes.
//!
//! Every route converts upstream failures into a `ProxyError`; no raw
//! error ever reaches the client. Connectivity failures map to 503,
//! upstream-reported errors mirror the upstream status, validation
//! failures map to 400, and anything unexpected maps to 500 with the
//! detail logged but not surfaced.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::upstream::UpstreamError;

/// Uniform error body returned to the client.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: String,
    pub details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Set on web-search failures: callers should fall back to LLM
    /// knowledge instead of treating the request as failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_recommended: Option<bool>,
}

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("cannot reach {service}")]
    Unreachable {
        service: &'static str,
        url: String,
        detail: String,
        hint: String,
        fallback_recommended: bool,
    },
    #[error("upstream returned {status}")]
    Upstream {
        status: u16,
        details: String,
        fallback_recommended: bool,
    },
    #[error("unexpected failure: {0}")]
    Internal(String),
}

impl ProxyError {
    /// Map an upstream client failure for `service`, with a route-specific
    /// `hint` shown on connectivity failures.
    pub fn from_upstream(
        service: &'static str,
        url: &str,
        hint: &str,
        e: UpstreamError,
    ) -> Self {
        match e {
            UpstreamError::Connection { .. } | UpstreamError::Timeout(_) => {
                ProxyError::Unreachable {
                    service,
                    url: url.to_string(),
                    detail: e.to_string(),
                    hint: hint.to_string(),
                    fallback_recommended: false,
                }
            }
            UpstreamError::Status { status, body } => ProxyError::Upstream {
                status,
                details: body,
                fallback_recommended: false,
            },
            UpstreamError::InvalidResponse(detail) => ProxyError::Internal(detail),
        }
    }

    /// Mark the failure as safe to paper over with LLM knowledge.
    pub fn with_llm_fallback(mut self) -> Self {
        match &mut self {
            ProxyError::Unreachable {
                fallback_recommended,
                ..
            }
            | ProxyError::Upstream {
                fallback_recommended,
                ..
            } => *fallback_recommended = true,
            _ => {}
        }
        self
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, envelope) = match self {
            ProxyError::InvalidRequest(details) => (
                StatusCode::BAD_REQUEST,
                ErrorEnvelope {
                    error: "Invalid request".to_string(),
                    details,
                    hint: None,
                    fallback_recommended: None,
                },
            ),
            ProxyError::Unreachable {
                service,
                url,
                detail,
                hint,
                fallback_recommended,
            } => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorEnvelope {
                    error: format!("Failed to connect to {service}"),
                    details: format!("Cannot reach {url}. {detail}"),
                    hint: Some(hint),
                    fallback_recommended: fallback_recommended.then_some(true),
                },
            ),
            ProxyError::Upstream {
                status,
                details,
                fallback_recommended,
            } => {
                let code = StatusCode::from_u16(status)
                    .unwrap_or(StatusCode::BAD_GATEWAY);
                (
                    code,
                    ErrorEnvelope {
                        error: format!(
                            "API error: {}",
                            code.canonical_reason().unwrap_or("upstream error")
                        ),
                        details,
                        hint: None,
                        fallback_recommended: fallback_recommended.then_some(true),
                    },
                )
            }
            ProxyError::Internal(detail) => {
                tracing::error!(detail, "proxy internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorEnvelope {
                        error: "Proxy error".to_string(),
                        details: "An unexpected error occurred".to_string(),
                        hint: None,
                        fallback_recommended: None,
                    },
                )
            }
        };

        (status, Json(envelope)).into_response()
    }
}
