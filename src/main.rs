use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cinerec::catalog::CatalogStore;
use cinerec::config::Config;
use cinerec::db;
use cinerec::routes::create_router;
use cinerec::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinerec=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Fail fast: without a coherent artifact pair the process cannot serve
    let catalog = Arc::new(CatalogStore::load(&config.catalog_path, &config.matrix_path)?);
    tracing::info!(
        movies = catalog.len(),
        terms = catalog.matrix().cols(),
        "Catalog artifact loaded"
    );

    let pool = db::create_pool(&config.database_url)?;
    let state = AppState::new(catalog, pool, config.fuzzy_threshold);

    // Best-effort: the catalog-backed read path serves even without the
    // relational store
    if let Err(e) = state.history.init().await {
        tracing::warn!(error = %e, "Could not initialize search history table");
    }

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
