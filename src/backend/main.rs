/**
 * Taskboard Server Entry Point
 *
 * Loads configuration from the environment (and `.env` if present),
 * initializes tracing and serves the Axum app.
 */

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let config = taskboard::shared::AppConfig::from_env()?;

    eprintln!("[STARTUP] Setting log filter {}", config.log_filter);

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .init();

    tracing::info!("[STARTUP] Server initialization started");

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let app = taskboard::backend::create_app(config).await;

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    eprintln!("[STARTUP] Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
