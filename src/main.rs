use tracing_subscriber::EnvFilter;

use ignize_proxy::api::{proxy_router, ApiContext};
use ignize_proxy::config::{self, UpstreamConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    let upstreams = UpstreamConfig::from_env();
    tracing::info!(
        version = config::APP_VERSION,
        gateway = %upstreams.gateway_url,
        rag = %upstreams.rag_url,
        vllm = %upstreams.vllm_url,
        current_affairs = %upstreams.current_affairs_url,
        "ignize-proxy starting"
    );

    let app = proxy_router(ApiContext::new(&upstreams));

    let addr = config::bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await?;

    Ok(())
}
