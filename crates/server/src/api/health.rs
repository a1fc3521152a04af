//! Process-level probes: `/`, `/health`, `/readiness` and `/liveness`.
//!
//! None of these touch the datastore and none of them can fail.

use axum::{Extension, Json};
use time::OffsetDateTime;

use crate::AppResources;
use crate::response::{
    HealthResponse, LivenessResponse, ProbeStatus, ReadinessResponse, RootResponse,
};

/// Tag for OpenAPI documentation.
pub const PROBES_TAG: &str = "Probes";

/// Banner route.
#[tracing::instrument]
#[utoipa::path(
    get,
    path = "/",
    tag = PROBES_TAG,
    operation_id = "Root",
    summary = "Service banner",
    responses(
        (status = 200, description = "Service is running", body = RootResponse, content_type = "application/json")
    )
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse::default())
}

/// Health check endpoint.
#[tracing::instrument(skip(resources))]
#[utoipa::path(
    get,
    path = "/health",
    tag = PROBES_TAG,
    operation_id = "Health Check",
    summary = "Service health check",
    description = "Returns `ok` together with static build and deployment metadata.\n\n\
                   The commit is taken from `RENDER_GIT_COMMIT` and reads `unknown` when unset.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse, content_type = "application/json")
    )
)]
pub async fn health(Extension(resources): Extension<AppResources>) -> Json<HealthResponse> {
    let config = &resources.config;
    Json(HealthResponse {
        status: ProbeStatus::Ok,
        ts: OffsetDateTime::now_utc(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        commit: config.commit().to_string(),
        environment: config.environment.clone(),
        service: config.service_name.clone(),
    })
}

/// Readiness probe. The sub-checks are reported, not measured.
#[tracing::instrument]
#[utoipa::path(
    get,
    path = "/readiness",
    tag = PROBES_TAG,
    operation_id = "Readiness Check",
    summary = "Readiness probe",
    description = "Signals the service can take traffic now. Use `/db/ping` for a real datastore check.",
    responses(
        (status = 200, description = "Service is ready", body = ReadinessResponse, content_type = "application/json")
    )
)]
pub async fn readiness() -> Json<ReadinessResponse> {
    Json(ReadinessResponse::now())
}

/// Liveness probe.
#[tracing::instrument(skip(resources))]
#[utoipa::path(
    get,
    path = "/liveness",
    tag = PROBES_TAG,
    operation_id = "Liveness Check",
    summary = "Liveness probe",
    responses(
        (status = 200, description = "Process is alive", body = LivenessResponse, content_type = "application/json")
    )
)]
pub async fn liveness(Extension(resources): Extension<AppResources>) -> Json<LivenessResponse> {
    Json(LivenessResponse::with_uptime(resources.uptime_secs()))
}
