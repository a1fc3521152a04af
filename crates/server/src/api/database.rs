//! Datastore connectivity probe.

use axum::{Extension, Json, http::StatusCode};

use crate::AppResources;
use crate::api::health::PROBES_TAG;
use crate::datastore::AuditEntry;
use crate::error::DatastoreError;
use crate::response::DbPingResponse;

/// Opens a connection, runs `SELECT 1` and closes it again.
///
/// A successful ping schedules an `audit_logs` row in the background; the
/// response never waits for it.
#[tracing::instrument(skip(resources))]
#[utoipa::path(
    get,
    path = "/db/ping",
    tag = PROBES_TAG,
    operation_id = "Database Ping",
    summary = "Database connectivity probe",
    description = "Checks that the datastore named by `DATABASE_URL` accepts a connection and a trivial query.\n\n\
                   When no database is configured the probe answers `not_configured` with HTTP 200; \
                   a failed connection or query answers `error` with HTTP 500.",
    responses(
        (status = 200, description = "Database reachable, or no database configured", body = DbPingResponse, content_type = "application/json"),
        (status = 500, description = "Connection or query failed", body = DbPingResponse, content_type = "application/json")
    )
)]
pub async fn db_ping(
    Extension(resources): Extension<AppResources>,
) -> (StatusCode, Json<DbPingResponse>) {
    match resources.datastore.ping().await {
        Ok(()) => {
            drop(resources.datastore.spawn_audit(AuditEntry::db_ping()));
            (StatusCode::OK, Json(DbPingResponse::ok()))
        }
        Err(DatastoreError::NotConfigured) => {
            tracing::debug!("db ping skipped: no database configured");
            (StatusCode::OK, Json(DbPingResponse::not_configured()))
        }
        Err(e) => {
            tracing::error!(error = %e, "database ping failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DbPingResponse::failed(e.to_string())),
            )
        }
    }
}
