use sea_orm::entity::prelude::*;
use sea_orm::{FromQueryResult, QueryResult};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, PrimitiveDateTime};
use time::macros::datetime;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tenants")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// A tenant row as listed by `/api/tenants`.
///
/// The identifier is opaque to this service and is always read back as text,
/// whatever its column type in the datastore. `created_at` may be stored with
/// or without a zone; zoneless values are taken as UTC.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Tenant {
    pub id: String,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Tenant {
    /// Stand-in row served when no live database is configured.
    pub fn mock() -> Self {
        Self {
            id: "00000000-0000-0000-0000-000000000001".to_string(),
            name: "Demo Tenant".to_string(),
            created_at: datetime!(2025-01-01 00:00:00 UTC),
        }
    }
}

impl FromQueryResult for Tenant {
    fn from_query_result(res: &QueryResult, pre: &str) -> Result<Self, DbErr> {
        Ok(Self {
            id: res.try_get(pre, "id")?,
            name: res.try_get(pre, "name")?,
            created_at: utc_timestamp(res, pre, "created_at")?,
        })
    }
}

/// Reads `TIMESTAMPTZ`-style columns directly and falls back to a zoneless
/// `TIMESTAMP`, which is assumed to be UTC.
fn utc_timestamp(res: &QueryResult, pre: &str, col: &str) -> Result<OffsetDateTime, DbErr> {
    match res.try_get::<OffsetDateTime>(pre, col) {
        Ok(ts) => Ok(ts),
        Err(zoned_err) => res
            .try_get::<PrimitiveDateTime>(pre, col)
            .map(PrimitiveDateTime::assume_utc)
            .map_err(|_| zoned_err),
    }
}
