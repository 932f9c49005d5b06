/**
 * Huddle Server Entry Point
 *
 * Loads configuration, opens the database and serves HTTP and WebSocket
 * traffic on a single listener until Ctrl+C.
 */

use std::net::SocketAddr;

use huddle::backend::server::{create_app, AppConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Environment files are optional; real environment variables win
    dotenv::from_path("config/config.env").ok();
    dotenv::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = AppConfig::from_env()?;
    let port = config.port;
    let mode = config.run_mode.clone();

    let app = create_app(config).await?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server running in {} mode on port {}", mode, port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
