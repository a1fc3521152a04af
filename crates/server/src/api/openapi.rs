//! OpenAPI/Utoipa configuration.

use crate::api::{health::PROBES_TAG, tenants::TENANTS_TAG};
use utoipa::OpenApi;

/// OpenAPI documentation configuration.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Morning AI API",
        description = "Health, readiness and datastore probes for the Morning AI platform."
    ),
    tags(
        (name = PROBES_TAG, description = "Liveness, readiness, health and database probes"),
        (name = TENANTS_TAG, description = "Read-only tenant listing")
    )
)]
pub struct ApiDoc;
