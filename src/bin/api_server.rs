// src/bin/api_server.rs

use ehealth_registry::infra::telemetry;
use ehealth_registry::{storage, transport, Config, Registrar};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();
    let config = Config::from_env()?;

    // --- Store Initialization ---
    tracing::info!(backend = ?config.store_backend, "initializing account store");
    let store = storage::open_store(&config).await?;

    // --- Registrar Initialization ---
    let registrar = Registrar::new(store.clone(), config.password_hasher()?);
    let app_state = transport::http::AppState {
        registrar,
        store: store.clone(),
    };

    // --- API Server Initialization ---
    let cors = transport::http::cors_layer(&config.cors_origin)?;
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %config.bind_addr(), "API server listening");
    tracing::info!(origin = %config.cors_origin, "CORS allowed origin");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for shutdown signal");
            }
            tracing::info!("shutdown signal received");
        })
        .await?;

    store.close().await;
    tracing::info!("graceful shutdown complete");
    Ok(())
}
