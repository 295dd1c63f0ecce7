//! Evaluation metrics aggregator — `POST /api/metrics/run`.
//!
//! The one route that never fails: any problem reaching the solver
//! backend (unreachable, timeout, non-2xx, malformed JSON) yields the
//! fixed example snapshot with status 200 so the metrics dashboard is
//! always renderable, even with no backend at all. Intentional policy;
//! see DESIGN.md before changing it.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::api::types::ApiContext;
use crate::normalize::{metrics_result, MetricsResult};

const DEFAULT_LIMIT: u64 = 20;
const DEFAULT_BATCH_SIZE: u64 = 5;

/// `POST /api/metrics/run` — run an evaluation batch on the solver.
///
/// Body `{limit = 20, batch_size = 5}` (`batchSize` also accepted, the
/// dashboard sends camelCase). Success reshapes the solver's snake_case
/// record into the camelCase `MetricsResult`; failure returns the
/// example snapshot, never an error.
pub async fn run(
    State(ctx): State<ApiContext>,
    body: Option<Json<Value>>,
) -> Json<MetricsResult> {
    let body = body.map(|Json(v)| v).unwrap_or(Value::Null);

    let limit = body["limit"].as_u64().unwrap_or(DEFAULT_LIMIT);
    let batch_size = body["batch_size"]
        .as_u64()
        .or_else(|| body["batchSize"].as_u64())
        .unwrap_or(DEFAULT_BATCH_SIZE);

    match ctx.solver.evaluate(limit, batch_size).await {
        Ok(raw) => Json(metrics_result(&raw)),
        Err(e) => {
            tracing::warn!(error = %e, "solver backend unavailable, serving example snapshot");
            Json(MetricsResult::example_snapshot())
        }
    }
}

#[derive(Serialize)]
pub struct MetricsDescriptor {
    pub status: &'static str,
    pub message: &'static str,
}

/// `GET /api/metrics/run` — route descriptor for manual probing.
pub async fn describe() -> Json<MetricsDescriptor> {
    Json(MetricsDescriptor {
        status: "ok",
        message: "Metrics API - POST /api/metrics/run to run evaluation",
    })
}
