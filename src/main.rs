use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use scrum_data::{config, db};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = config::init()?;

    // Fails here if the server is unreachable or rejects the credentials
    let db = db::init(&config).await?;
    db.ping().await?;

    info!(connections = db.get_pool().size(), "database connection established");

    db.close().await;

    Ok(())
}
