use noted::config::Config;
use noted::db::NoteStore;
use noted::{app, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    tracing::debug!(?config, "loaded config");

    // Schema or connection failure here ends the process before serving.
    let store = NoteStore::connect(&config.database_url, config.max_connections).await?;
    let state = AppState::new(store.clone())?;

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!("server started at http://{}", listener.local_addr()?);

    axum::serve(listener, app(state, &config.static_dir))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
