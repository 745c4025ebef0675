use std::sync::Arc;

use coplay_api::{
    api::{create_router, AppState},
    catalog::FileCatalog,
    config::Config,
    services::providers::SteamProvider,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let catalog = Arc::new(FileCatalog::open(&config.catalog_dir).await?);
    let players = Arc::new(SteamProvider::new(
        config.steam_api_key.clone(),
        config.steam_api_url.clone(),
    ));

    let state = AppState::new(catalog, players);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
