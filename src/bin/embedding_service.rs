use axum::extract::DefaultBodyLimit;
use axum::Router;
use rag_file_service::core::config::{EmbeddingConfig, SwaggerConfig};
use rag_file_service::core::openapi::EmbeddingApiDoc;
use rag_file_service::core::server;
use rag_file_service::features::embedding::{
    routes as embedding_routes, EmbeddingService, FastEmbedder, MODEL_NAME,
};
use std::sync::Arc;
use utoipa::OpenApi;

fn main() -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    server::init_tracing();

    let config = EmbeddingConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;
    let swagger = SwaggerConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!("Configuration loaded successfully");

    // First start downloads the weights
    tracing::info!("Loading embedding model {}...", MODEL_NAME);
    let cache_dir = config.cache_dir.clone();
    let embedder = tokio::task::spawn_blocking(move || FastEmbedder::try_new(cache_dir))
        .await?
        .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", MODEL_NAME, e))?;
    tracing::info!("Embedding model {} loaded", MODEL_NAME);

    let embedding_service = Arc::new(EmbeddingService::new(Arc::new(embedder)));

    let app = Router::new()
        .merge(server::swagger_router(
            EmbeddingApiDoc::openapi(),
            swagger.credentials(),
        ))
        .merge(
            embedding_routes(embedding_service)
                .layer(DefaultBodyLimit::max(config.max_request_body_size)),
        )
        .merge(server::health_router());
    let app = server::with_http_layers(app, config.cors_allowed_origins.clone());

    let addr = config.server_address();
    let listener = server::bind_listener(&addr)?;
    tracing::info!("Embedding service listening on {}", format!("http://{}", addr));

    axum::serve(listener, app)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    tracing::info!("Embedding service stopped");
    Ok(())
}
