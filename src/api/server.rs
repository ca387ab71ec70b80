//! Server lifecycle: bind, serve until Ctrl-C.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::api::router::api_router;
use crate::pipeline::CasePipeline;

pub async fn serve(addr: SocketAddr, pipeline: Arc<CasePipeline>) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let addr = listener.local_addr()?;
    let app = api_router(pipeline);

    tracing::info!(%addr, "API server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("API server received shutdown signal");
}
