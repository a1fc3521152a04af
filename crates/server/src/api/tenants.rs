//! Tenant listing.

use axum::{Extension, Json};

use crate::AppResources;
use crate::datastore::TENANT_LIST_LIMIT;
use crate::entity::tenant::Tenant;
use crate::error::{ApiError, DatastoreError};
use crate::response::{ErrorResponse, TenantsResponse};

/// Tag for OpenAPI documentation.
pub const TENANTS_TAG: &str = "Tenants";

/// Lists the most recently created tenants, newest first.
#[tracing::instrument(skip(resources))]
#[utoipa::path(
    get,
    path = "/api/tenants",
    tag = TENANTS_TAG,
    operation_id = "List Tenants",
    summary = "Most recent tenants",
    description = "Returns up to 10 tenants ordered by creation time, newest first.\n\n\
                   Without a configured database a single fixed demo tenant is returned.",
    responses(
        (status = 200, description = "Tenant list", body = TenantsResponse, content_type = "application/json"),
        (status = 500, description = "Datastore failure", body = ErrorResponse, content_type = "application/json")
    )
)]
pub async fn list_tenants(
    Extension(resources): Extension<AppResources>,
) -> Result<Json<TenantsResponse>, ApiError> {
    let data = match resources.datastore.recent_tenants(TENANT_LIST_LIMIT).await {
        Ok(tenants) => tenants,
        Err(DatastoreError::NotConfigured) => vec![Tenant::mock()],
        Err(e) => return Err(e.into()),
    };
    tracing::debug!(count = data.len(), "listed tenants");
    Ok(Json(TenantsResponse::ok(data)))
}
