//! Proxy router.
//!
//! Returns a composable `Router` with one handler per capability.
//! No middleware stack beyond CORS: routes are stateless, unauthenticated
//! proxies (the upstreams enforce their own policies), and the browser
//! client is the whole reason this layer exists.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Upload cap for answer sheets and documents (25 MB).
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Build the proxy router.
pub fn proxy_router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/api/chat", post(endpoints::chat::chat))
        .route("/api/chat/compose", post(endpoints::chat::compose))
        .route(
            "/api/proxy",
            post(endpoints::query::query).get(endpoints::query::passthrough),
        )
        .route("/api/vllm", post(endpoints::completion::completions))
        .route("/api/web-search", post(endpoints::web_search::web_search))
        .route(
            "/api/metrics/run",
            post(endpoints::metrics::run).get(endpoints::metrics::describe),
        )
        .route("/api/evaluate", post(endpoints::evaluate::evaluate))
        .route("/api/documents/upload", post(endpoints::documents::upload))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}
