use axum::extract::DefaultBodyLimit;
use axum::Router;
use rag_file_service::core::config::Config;
use rag_file_service::core::openapi::{ApiDoc, SwaggerInfoModifier};
use rag_file_service::core::{database, server};
use rag_file_service::features::files::{
    routes as files_routes, FileRepository, FileService, PgFileRepository,
};
use rag_file_service::features::search::{routes as search_routes, SearchService};
use std::sync::Arc;
use utoipa::Modify;
use utoipa::OpenApi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();
    server::init_tracing();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "System info: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    database::run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Both features share one repository over the same table
    let repository: Arc<dyn FileRepository> = Arc::new(PgFileRepository::new(pool));
    let file_service = Arc::new(FileService::new(Arc::clone(&repository)));
    let search_service = Arc::new(SearchService::new(repository));
    tracing::info!("File and search services initialized");

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let api_routes = Router::new()
        .merge(files_routes(file_service))
        .merge(search_routes(search_service))
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size));

    let app = Router::new()
        .merge(server::swagger_router(openapi, config.swagger.credentials()))
        .merge(api_routes)
        .merge(server::health_router());
    let app = server::with_http_layers(app, config.app.cors_allowed_origins.clone());

    let addr = config.app.server_address();
    let listener = server::bind_listener(&addr)?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
