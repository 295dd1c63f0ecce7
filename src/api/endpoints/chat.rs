//! Chat endpoints.
//!
//! Two flavors:
//! - `POST /api/chat` — plain proxy to the API gateway's chat endpoint,
//!   which returns an answer plus RAG citations.
//! - `POST /api/chat/compose` — the multi-source composition: optional
//!   trusted-source web search gating an LLM completion fallback.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::api::error::ProxyError;
use crate::api::types::ApiContext;
use crate::compose::{compose_answer, ComposedAnswer};

#[derive(Serialize)]
struct ChatForward<'a> {
    message: &'a str,
    mode: &'a str,
    use_rag: bool,
    use_reranker: bool,
}

/// `POST /api/chat` — validate, default, forward to the gateway.
///
/// Defaults: `mode="general"`, `use_rag=true`, `use_reranker=true`.
/// The gateway's success body is passed through untouched.
pub async fn chat(
    State(ctx): State<ApiContext>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ProxyError> {
    let message = body["message"]
        .as_str()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| {
            ProxyError::InvalidRequest("message is required and must be a non-empty string".into())
        })?;

    let forward = ChatForward {
        message,
        mode: body["mode"].as_str().unwrap_or("general"),
        use_rag: body["use_rag"].as_bool().unwrap_or(true),
        use_reranker: body["use_reranker"].as_bool().unwrap_or(true),
    };

    let data = ctx.gateway.chat(&forward).await.map_err(|e| {
        ProxyError::from_upstream(
            "API Gateway",
            ctx.gateway.base_url(),
            &format!(
                "Check API gateway at {} and ensure its port is open",
                ctx.gateway.base_url()
            ),
            e,
        )
    })?;

    Ok(Json(data))
}

/// `POST /api/chat/compose` — the two-stage web-search/LLM chain.
///
/// Body: `{query, use_web_search = false, citations = false}`.
/// Exactly one source supplies the answer; see `crate::compose`.
pub async fn compose(
    State(ctx): State<ApiContext>,
    Json(body): Json<Value>,
) -> Result<Json<ComposedAnswer>, ProxyError> {
    let query = body["query"]
        .as_str()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| {
            ProxyError::InvalidRequest("query is required and must be a non-empty string".into())
        })?;

    let use_web_search = body["use_web_search"].as_bool().unwrap_or(false);
    let citations = body["citations"].as_bool().unwrap_or(false);

    let composed = compose_answer(&ctx.search, &ctx.llm, query, use_web_search, citations)
        .await
        .map_err(|e| {
            ProxyError::from_upstream(
                "vLLM service",
                ctx.llm.base_url(),
                "Make sure the vLLM service is running and its port is open",
                e,
            )
        })?;

    Ok(Json(composed))
}
