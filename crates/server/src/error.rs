use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use thiserror::Error;

use crate::response::ErrorResponse;

#[derive(Debug, Error)]
pub enum DatastoreError {
    #[error("Database is not configured")]
    NotConfigured,
    #[error("Database connection failed: {0}")]
    Connect(#[source] DbErr),
    #[error("Database query failed: {0}")]
    Query(#[source] DbErr),
    #[error("Database call timed out after {0:?}")]
    Timeout(std::time::Duration),
}

impl DatastoreError {
    /// True when the failure means "nothing to talk to" rather than a broken database.
    pub fn is_not_configured(&self) -> bool {
        matches!(self, DatastoreError::NotConfigured)
    }
}

/// Errors surfaced to HTTP callers as a JSON body with status 500.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Datastore(#[from] DatastoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(self.to_string())),
        )
            .into_response()
    }
}
