//! vLLM completion proxy — `POST /api/vllm`.

use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::api::error::ProxyError;
use crate::api::types::ApiContext;

/// `POST /api/vllm` — forward an OpenAI-style completion request
/// verbatim and pass the completion JSON back untouched.
pub async fn completions(
    State(ctx): State<ApiContext>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ProxyError> {
    let data = ctx.llm.chat_completions(&body).await.map_err(|e| {
        ProxyError::from_upstream(
            "vLLM service",
            ctx.llm.base_url(),
            "Make sure the vLLM service is running and its port is open",
            e,
        )
    })?;

    Ok(Json(data))
}
