//! JSON bodies returned by the probe endpoints.
//!
//! Every body is built fresh per request. Timestamps are taken when the body is
//! constructed and serialize as RFC 3339 in UTC (`...Z`).

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::entity::tenant::Tenant;

/// Message returned by the root route.
pub const ROOT_MESSAGE: &str = "Morning AI API is running";

/// Note attached to `/db/ping` when no live database is configured.
pub const DB_NOT_CONFIGURED_NOTE: &str =
    "DATABASE_URL is not set to a database connection string; no connectivity check was performed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStatus {
    Ok,
    Error,
    NotConfigured,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RootResponse {
    pub message: String,
    pub status: ProbeStatus,
}

impl Default for RootResponse {
    fn default() -> Self {
        Self {
            message: ROOT_MESSAGE.to_string(),
            status: ProbeStatus::Ok,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: ProbeStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub ts: OffsetDateTime,
    pub version: String,
    pub commit: String,
    pub environment: String,
    pub service: String,
}

/// Sub-checks reported by `/readiness`. These are static and not probed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReadinessChecks {
    pub database: ProbeStatus,
    pub memory: ProbeStatus,
    pub disk: ProbeStatus,
}

impl Default for ReadinessChecks {
    fn default() -> Self {
        Self {
            database: ProbeStatus::Ok,
            memory: ProbeStatus::Ok,
            disk: ProbeStatus::Ok,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReadinessResponse {
    pub status: ProbeStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub ts: OffsetDateTime,
    pub checks: ReadinessChecks,
}

impl ReadinessResponse {
    pub fn now() -> Self {
        Self {
            status: ProbeStatus::Ok,
            ts: OffsetDateTime::now_utc(),
            checks: ReadinessChecks::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LivenessResponse {
    pub status: ProbeStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub ts: OffsetDateTime,
    /// Whole seconds since the process started serving.
    pub uptime: u64,
}

impl LivenessResponse {
    pub fn with_uptime(uptime: u64) -> Self {
        Self {
            status: ProbeStatus::Ok,
            ts: OffsetDateTime::now_utc(),
            uptime,
        }
    }
}

/// Body of `/db/ping`. Exactly one of `note` or `error` is present unless the
/// ping succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DbPingResponse {
    pub db: ProbeStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub ts: OffsetDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DbPingResponse {
    pub fn ok() -> Self {
        Self {
            db: ProbeStatus::Ok,
            ts: OffsetDateTime::now_utc(),
            note: None,
            error: None,
        }
    }

    pub fn not_configured() -> Self {
        Self {
            db: ProbeStatus::NotConfigured,
            ts: OffsetDateTime::now_utc(),
            note: Some(DB_NOT_CONFIGURED_NOTE.to_string()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            db: ProbeStatus::Error,
            ts: OffsetDateTime::now_utc(),
            note: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TenantsResponse {
    pub status: ProbeStatus,
    pub data: Vec<Tenant>,
}

impl TenantsResponse {
    pub fn ok(data: Vec<Tenant>) -> Self {
        Self {
            status: ProbeStatus::Ok,
            data,
        }
    }
}

/// Body returned with HTTP 500 when a datastore operation fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub status: ProbeStatus,
    pub detail: String,
    #[serde(with = "time::serde::rfc3339")]
    pub ts: OffsetDateTime,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            status: ProbeStatus::Error,
            detail: detail.into(),
            ts: OffsetDateTime::now_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use time::format_description::well_known::Rfc3339;

    #[test]
    fn probe_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(ProbeStatus::NotConfigured).unwrap(),
            Value::from("not_configured")
        );
        assert_eq!(serde_json::to_value(ProbeStatus::Ok).unwrap(), Value::from("ok"));
    }

    #[test]
    fn timestamps_carry_utc_suffix() {
        let body = serde_json::to_value(ReadinessResponse::now()).unwrap();
        let ts = body["ts"].as_str().unwrap();
        assert!(ts.ends_with('Z'), "timestamp {ts} is not UTC-suffixed");
        let parsed = OffsetDateTime::parse(ts, &Rfc3339).unwrap();
        assert_eq!(parsed.offset(), time::UtcOffset::UTC);
    }

    #[test]
    fn db_ping_success_omits_note_and_error() {
        let body = serde_json::to_value(DbPingResponse::ok()).unwrap();
        assert_eq!(body["db"], "ok");
        assert!(body.get("note").is_none());
        assert!(body.get("error").is_none());
    }

    #[test]
    fn db_ping_failure_keeps_message() {
        let body = serde_json::to_value(DbPingResponse::failed("connection refused")).unwrap();
        assert_eq!(body["db"], "error");
        assert_eq!(body["error"], "connection refused");
        assert!(body.get("note").is_none());
    }

    #[test]
    fn readiness_checks_are_all_ok() {
        let body = serde_json::to_value(ReadinessChecks::default()).unwrap();
        for key in ["database", "memory", "disk"] {
            assert_eq!(body[key], "ok");
        }
    }
}
