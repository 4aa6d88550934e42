//! Threads server binary
//!
//! Serves the cultural learning app and its progress API.

use threads_server::{ServerConfig, ThreadsServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "threads_server=info,threads_core=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    let server = ThreadsServer::new(config)?;
    server.run().await?;

    Ok(())
}
