//! HTTP surface of the probe service.
//!
//! This module is organized into submodules:
//! - `health` - Banner and process probes (`/`, `/health`, `/readiness`, `/liveness`)
//! - `database` - Datastore connectivity probe (`/db/ping`)
//! - `tenants` - Tenant listing (`/api/tenants`)
//! - `openapi` - OpenAPI/Utoipa configuration

pub mod database;
pub mod health;
pub mod openapi;
pub mod tenants;

pub use health::PROBES_TAG;
pub use tenants::TENANTS_TAG;

use crate::AppResources;
use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};

/// The documented route set, without state or middleware.
fn api_routes() -> OpenApiRouter {
    OpenApiRouter::with_openapi(openapi::ApiDoc::openapi())
        .routes(routes!(health::root))
        .routes(routes!(health::health))
        .routes(routes!(health::readiness))
        .routes(routes!(health::liveness))
        .routes(routes!(database::db_ping))
        .routes(routes!(tenants::list_tenants))
}

/// OpenAPI document covering every route the service answers.
pub fn openapi_document() -> utoipa::openapi::OpenApi {
    let (_, api) = api_routes().split_for_parts();
    api
}

/// Builds the full application router with resources, CORS and request tracing attached.
pub fn router(app_resources: AppResources) -> Router {
    let (router, _) = api_routes().split_for_parts();
    router
        .layer(axum::Extension(app_resources))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Binds the configured address and serves until the process is stopped.
#[tracing::instrument(skip(app_resources))]
pub async fn start_webserver(app_resources: AppResources) -> color_eyre::Result<()> {
    let addr = app_resources.config.bind_addr();
    let router = router(app_resources);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Server running");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| color_eyre::Report::msg(format!("Failed to start server: {e}")))?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
