//! RAG query proxy — `POST /api/proxy` and the GET passthrough.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::error::ProxyError;
use crate::api::types::ApiContext;
use crate::normalize;

const RAG_HINT: &str = "Make sure the RAG service is accessible at the configured URL";

/// `POST /api/proxy` — validated, defaulted RAG query.
///
/// Required: `query` (non-empty string). Defaults applied when omitted:
/// `document_type="textbook"`, `top_k=5`, `use_llm=true`,
/// `use_web_search=false`. Unknown fields pass through untouched for
/// forward compatibility. The upstream body is normalized into the
/// stable `QueryResponse` shape.
pub async fn query(
    State(ctx): State<ApiContext>,
    Json(mut body): Json<Value>,
) -> Result<Json<normalize::QueryResponse>, ProxyError> {
    let query = body["query"]
        .as_str()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            ProxyError::InvalidRequest("query is required and must be a non-empty string".into())
        })?;

    if let Some(top_k) = body.get("top_k") {
        if !top_k.as_u64().is_some_and(|k| k > 0) {
            return Err(ProxyError::InvalidRequest(
                "top_k must be a positive integer".into(),
            ));
        }
    }

    let payload = body.as_object_mut().ok_or_else(|| {
        ProxyError::InvalidRequest("request body must be a JSON object".into())
    })?;
    payload
        .entry("document_type")
        .or_insert_with(|| json!("textbook"));
    payload.entry("top_k").or_insert_with(|| json!(5));
    payload.entry("use_llm").or_insert_with(|| json!(true));
    payload
        .entry("use_web_search")
        .or_insert_with(|| json!(false));

    let raw = ctx.rag.query_with_llm(&body).await.map_err(|e| {
        ProxyError::from_upstream("RAG service", ctx.rag.base_url(), RAG_HINT, e)
    })?;

    Ok(Json(normalize::query_response(&query, &raw)))
}

#[derive(Deserialize)]
pub struct PassthroughParams {
    pub endpoint: Option<String>,
}

/// `GET /api/proxy?endpoint=X` — read-only passthrough to the RAG
/// service (`health` when no endpoint is given). The upstream body is
/// forwarded verbatim.
pub async fn passthrough(
    State(ctx): State<ApiContext>,
    Query(params): Query<PassthroughParams>,
) -> Result<Json<Value>, ProxyError> {
    let endpoint = params.endpoint.as_deref().unwrap_or("health");

    let data = ctx.rag.get(endpoint).await.map_err(|e| {
        ProxyError::from_upstream("RAG service", ctx.rag.base_url(), RAG_HINT, e)
    })?;

    Ok(Json(data))
}
