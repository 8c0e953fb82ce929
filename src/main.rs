use anyhow::{Context, Result};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use carkg_frontend::{
    backend::HttpBackend,
    config::Settings,
    routes::{self, AppState},
    runtime,
};

// One event loop owns all UI state, so a single-threaded runtime is enough
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file first. Ignore errors (e.g., file not found)
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "carkg_frontend=info,tower_http=info".into()))
        .with(fmt::layer())
        .init();

    tracing::info!("Initializing vehicle search frontend...");

    let settings = match Settings::new() {
        Ok(s) => {
            tracing::info!("Configuration loaded successfully.");
            s
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    let backend = HttpBackend::new(&settings).context("Failed to set up backend client")?;
    tracing::info!("Search backend endpoint: {}", backend.endpoint());

    let (ui, event_loop) = runtime::spawn(backend);
    let app = routes::create_router(AppState { ui });

    let addr: SocketAddr = settings
        .server_address
        .parse()
        .with_context(|| format!("Invalid server address format: {}", settings.server_address))?;

    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => {
            tracing::info!("Server listening on {}", addr);
            l
        }
        Err(e) => {
            tracing::error!("Failed to bind to address {}: {}", addr, e);
            return Err(e.into());
        }
    };

    axum::serve(listener, app.into_make_service()).await?;

    // Router (and with it every UI handle) is gone; let the loop wind down
    event_loop.await.context("Event loop task failed")?;
    Ok(())
}
