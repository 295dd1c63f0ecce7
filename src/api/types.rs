//! Shared state for the proxy router.

use crate::config::UpstreamConfig;
use crate::upstream::{
    CompletionClient, GatewayClient, IngestClient, RagClient, SearchClient, SolverClient,
};

/// Shared context for all proxy routes: one typed client per upstream,
/// all sharing a single `reqwest::Client` connection pool.
///
/// Read-only after construction — handlers never mutate it, so it is
/// safe to clone into every request.
#[derive(Clone)]
pub struct ApiContext {
    pub gateway: GatewayClient,
    pub rag: RagClient,
    pub ingest: IngestClient,
    pub llm: CompletionClient,
    pub search: SearchClient,
    pub solver: SolverClient,
}

impl ApiContext {
    pub fn new(config: &UpstreamConfig) -> Self {
        let http = reqwest::Client::new();

        Self {
            gateway: GatewayClient::new(
                &config.gateway_url,
                http.clone(),
                config.query_timeout,
            ),
            rag: RagClient::new(&config.rag_url, http.clone(), config.query_timeout),
            ingest: IngestClient::new(&config.doc_url, http.clone(), config.query_timeout),
            llm: CompletionClient::new(&config.vllm_url, http.clone(), config.query_timeout),
            search: SearchClient::new(
                &config.current_affairs_url,
                http.clone(),
                config.search_timeout,
            ),
            solver: SolverClient::new(&config.solver_url, http, config.query_timeout),
        }
    }
}
