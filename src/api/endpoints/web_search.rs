//! Current-affairs web-search proxy — `POST /api/web-search`.

use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::api::error::ProxyError;
use crate::api::types::ApiContext;
use crate::upstream::search::default_sources;

/// `POST /api/web-search` — search the trusted UPSC sources.
///
/// `sources` defaults to the full allow-list. The upstream's
/// `{answer, sources_used}` body is passed through unchanged. Failure
/// envelopes carry `fallback_recommended: true`: callers should answer
/// from LLM knowledge instead of failing the request.
pub async fn web_search(
    State(ctx): State<ApiContext>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ProxyError> {
    let query = body["query"]
        .as_str()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| {
            ProxyError::InvalidRequest("query is required and must be a non-empty string".into())
        })?;

    let sources: Vec<String> = body["sources"]
        .as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .filter(|v: &Vec<String>| !v.is_empty())
        .unwrap_or_else(default_sources);

    let data = ctx.search.web_search(query, &sources).await.map_err(|e| {
        ProxyError::from_upstream(
            "Current Affairs service",
            ctx.search.base_url(),
            "Web search will use LLM knowledge instead",
            e,
        )
        .with_llm_fallback()
    })?;

    Ok(Json(data))
}
