use rmcp::{
    transport::{
        stdio,
        streamable_http_server::{
            session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
        },
    },
    ServerHandler, ServiceExt,
};
use tracing_subscriber::EnvFilter;

use crate::config::{ServeArgs, Transport};

/// Install the stderr log subscriber. Stdout belongs to the stdio transport.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

/// Serve `S` on the configured transport until the client disconnects or
/// the process is interrupted.
pub async fn serve<S>(name: &str, args: &ServeArgs, default_port: u16) -> anyhow::Result<()>
where
    S: ServerHandler + Default,
{
    match args.transport {
        Transport::Stdio => {
            tracing::info!(server = name, "serving MCP over stdio");
            S::default().serve(stdio()).await?.waiting().await?;
        }
        Transport::Http => {
            let addr = args.bind_addr(default_port)?;
            let path = args.mount_path()?;
            // each request gets a fresh handler; no session state is kept
            let service = StreamableHttpService::new(
                || Ok(S::default()),
                LocalSessionManager::default().into(),
                StreamableHttpServerConfig {
                    stateful_mode: false,
                    ..Default::default()
                },
            );
            let router = axum::Router::new().nest_service(path, service);
            let listener = tokio::net::TcpListener::bind(addr).await?;

            tracing::info!(server = name, %addr, path, "serving MCP over streamable HTTP");
            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        }
    }

    tracing::info!(server = name, "server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
