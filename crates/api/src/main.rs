use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use workzone_api::{app, config::Config, middleware::logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    logging::init_logging(&config.logging);

    info!("Starting Workzone API v{}", env!("CARGO_PKG_VERSION"));

    let store = Arc::new(persistence::MemoryStore::new());
    let app = app::create_app(config.clone(), store);

    let addr = config.socket_addr();
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
