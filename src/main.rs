use podcast_indexer::{
    api::{build_router, AppState},
    config::Config,
    indexer::{ReindexCoordinator, ReindexPipeline, TaskRegistry},
    search::{EsAliasDirectory, SearchClient},
    source::MySqlSnapshotSource,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    // Initialize tracing; RUST_LOG overrides the configured level
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.observability.env_filter().into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.observability.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(
        service = %config.observability.service_name,
        "Starting podcast-indexer v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Connect the snapshot source
    let source = Arc::new(MySqlSnapshotSource::connect(&config.database).await?);
    tracing::info!("Snapshot source connected");

    // Build the search engine client and alias directory
    let client = Arc::new(SearchClient::new(&config.search)?);
    let directory = Arc::new(EsAliasDirectory::new(client.clone()));
    tracing::info!(url = %config.search.url, "Search engine client initialized");

    // Wire the pipeline and coordinator
    let pipeline = Arc::new(ReindexPipeline::new(
        source,
        client,
        directory,
        config.indexing.clone(),
    ));
    let registry = Arc::new(TaskRegistry::new());
    let coordinator = Arc::new(ReindexCoordinator::new(pipeline, registry));
    tracing::info!("Reindex coordinator initialized");

    // Build HTTP router
    let app = build_router(AppState::new(coordinator));

    // Start HTTP server
    let http_addr = format!("{}:{}", config.server.host, config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_addr).await?;

    tracing::info!("HTTP API server listening on http://{}", http_addr);
    tracing::info!("   Health check: http://{}/health", http_addr);
    tracing::info!("   Triggers: http://{}/v1/indexation/{{type}}", http_addr);
    tracing::info!("   Tasks: http://{}/v1/indexation/tasks", http_addr);

    let server = tokio::spawn(async move {
        if let Err(e) = axum::serve(http_listener, app).await {
            tracing::error!("HTTP server error: {}", e);
        }
    });

    tokio::select! {
        _ = server => {
            tracing::warn!("HTTP server stopped");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    tracing::info!("Shutting down gracefully...");
    Ok(())
}
