//! Access to the external datastore.
//!
//! Every operation opens its own single-connection pool, runs under the
//! configured timeout and closes the connection before returning, on the error
//! path as well as the success path. There are no retries.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveValue, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr,
    EntityTrait, QueryOrder, QuerySelect, Statement,
};
use time::OffsetDateTime;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::entity::{audit_log, tenant, tenant::Tenant};
use crate::error::DatastoreError;

/// Connection string prefixes treated as a live database.
pub const LIVE_URL_PREFIXES: [&str; 3] = ["postgres://", "postgresql://", "sqlite:"];

/// Maximum number of rows returned by `/api/tenants`.
pub const TENANT_LIST_LIMIT: u64 = 10;

/// Where, if anywhere, the datastore lives.
#[derive(Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    Live(String),
    NotConfigured,
}

impl DatabaseTarget {
    /// Absent, blank or unrecognized connection strings are not an error; they
    /// put the service in its degraded mode.
    pub fn classify(url: Option<&str>) -> Self {
        match url.map(str::trim) {
            Some(url) if LIVE_URL_PREFIXES.iter().any(|p| url.starts_with(p)) => {
                DatabaseTarget::Live(url.to_string())
            }
            _ => DatabaseTarget::NotConfigured,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, DatabaseTarget::Live(_))
    }
}

// Only the scheme is printed; connection strings usually embed credentials.
impl fmt::Debug for DatabaseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseTarget::Live(url) => {
                let scheme = url.split(':').next().unwrap_or_default();
                write!(f, "Live({scheme}:<redacted>)")
            }
            DatabaseTarget::NotConfigured => f.write_str("NotConfigured"),
        }
    }
}

/// One row destined for `audit_logs`.
#[derive(Clone, Debug, PartialEq)]
pub struct AuditEntry {
    pub actor: String,
    pub action: String,
    pub tenant_id: Option<Uuid>,
}

impl AuditEntry {
    pub const SYSTEM_ACTOR: &'static str = "system";
    pub const DB_PING_ACTION: &'static str = "db_ping";

    pub fn db_ping() -> Self {
        Self {
            actor: Self::SYSTEM_ACTOR.to_string(),
            action: Self::DB_PING_ACTION.to_string(),
            tenant_id: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Datastore {
    target: DatabaseTarget,
    timeout: Duration,
}

impl Datastore {
    pub fn new(target: DatabaseTarget, timeout: Duration) -> Self {
        Self { target, timeout }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.database_target(), config.db_timeout())
    }

    pub fn is_configured(&self) -> bool {
        self.target.is_live()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[tracing::instrument(skip(self))]
    async fn connect(&self) -> Result<DatabaseConnection, DatastoreError> {
        let DatabaseTarget::Live(url) = &self.target else {
            return Err(DatastoreError::NotConfigured);
        };

        let mut opts = ConnectOptions::new(url.clone());
        opts.max_connections(1)
            .min_connections(0)
            .connect_timeout(self.timeout)
            .acquire_timeout(self.timeout)
            .sqlx_logging(false);

        match timeout(self.timeout, Database::connect(opts)).await {
            Ok(Ok(db)) => Ok(db),
            Ok(Err(e)) => Err(DatastoreError::Connect(e)),
            Err(_) => Err(DatastoreError::Timeout(self.timeout)),
        }
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T, DatastoreError>
    where
        F: Future<Output = Result<T, DbErr>>,
    {
        match timeout(self.timeout, fut).await {
            Ok(result) => result.map_err(DatastoreError::Query),
            Err(_) => Err(DatastoreError::Timeout(self.timeout)),
        }
    }

    /// Close `db`, giving up after the configured timeout.
    async fn release(&self, db: DatabaseConnection) {
        match timeout(self.timeout, db.close()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::debug!(error = %e, "error while closing database connection"),
            Err(_) => tracing::warn!(
                timeout = ?self.timeout,
                "closing database connection timed out"
            ),
        }
    }

    /// Open a connection, run `SELECT 1`, close it.
    #[tracing::instrument(skip(self))]
    pub async fn ping(&self) -> Result<(), DatastoreError> {
        let db = self.connect().await?;
        let stmt = Statement::from_string(db.get_database_backend(), "SELECT 1");
        let result = self.bounded(db.query_one(stmt)).await.map(|_| ());
        self.release(db).await;
        result
    }

    /// The `limit` most recently created tenants, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn recent_tenants(&self, limit: u64) -> Result<Vec<Tenant>, DatastoreError> {
        let db = self.connect().await?;
        let query = tenant::Entity::find()
            .select_only()
            .column_as(Expr::cust("CAST(id AS TEXT)"), "id")
            .column(tenant::Column::Name)
            .column(tenant::Column::CreatedAt)
            .order_by_desc(tenant::Column::CreatedAt)
            .limit(limit)
            .into_model::<Tenant>();
        let result = self.bounded(query.all(&db)).await;
        self.release(db).await;
        result
    }

    #[tracing::instrument(skip(self))]
    pub async fn record_audit(&self, entry: &AuditEntry) -> Result<(), DatastoreError> {
        let db = self.connect().await?;
        let row = audit_log::ActiveModel {
            actor: ActiveValue::Set(entry.actor.clone()),
            action: ActiveValue::Set(entry.action.clone()),
            tenant_id: match entry.tenant_id {
                Some(id) => ActiveValue::Set(Some(id)),
                None => ActiveValue::NotSet,
            },
            created_at: ActiveValue::Set(OffsetDateTime::now_utc()),
            ..Default::default()
        };
        let result = self
            .bounded(audit_log::Entity::insert(row).exec_without_returning(&db))
            .await
            .map(|_| ());
        self.release(db).await;
        result
    }

    /// Write `entry` in the background. The caller never observes the outcome;
    /// failures are only logged.
    pub fn spawn_audit(&self, entry: AuditEntry) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            match store.record_audit(&entry).await {
                Ok(()) => tracing::debug!(action = %entry.action, "audit log entry written"),
                Err(e) => tracing::warn!(
                    error = %e,
                    action = %entry.action,
                    "failed to write audit log entry"
                ),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_recognizes_database_urls() {
        for url in [
            "postgres://u:p@localhost:5432/app",
            "postgresql://localhost/app",
            "sqlite::memory:",
            "sqlite:///tmp/app.db?mode=rwc",
        ] {
            assert!(DatabaseTarget::classify(Some(url)).is_live(), "{url}");
        }
    }

    #[test]
    fn classify_degrades_on_missing_or_unknown_urls() {
        for url in [
            None,
            Some(""),
            Some("   "),
            Some("https://example.supabase.co"),
            Some("mysql://localhost/app"),
        ] {
            assert_eq!(DatabaseTarget::classify(url), DatabaseTarget::NotConfigured);
        }
    }

    #[test]
    fn debug_redacts_credentials() {
        let target = DatabaseTarget::classify(Some("postgres://admin:s3cret@db/app"));
        let rendered = format!("{target:?}");
        assert_eq!(rendered, "Live(postgres:<redacted>)");
    }

    #[tokio::test]
    async fn unconfigured_store_reports_not_configured() {
        let store = Datastore::new(DatabaseTarget::NotConfigured, Duration::from_secs(1));
        assert!(!store.is_configured());
        assert!(store.ping().await.unwrap_err().is_not_configured());
        assert!(
            store
                .recent_tenants(TENANT_LIST_LIMIT)
                .await
                .unwrap_err()
                .is_not_configured()
        );
    }

    #[tokio::test]
    async fn ping_against_in_memory_sqlite() {
        let store = Datastore::new(
            DatabaseTarget::classify(Some("sqlite::memory:")),
            Duration::from_secs(5),
        );
        store.ping().await.unwrap();
    }

    #[tokio::test]
    async fn release_finishes_within_the_timeout() {
        let store = Datastore::new(
            DatabaseTarget::classify(Some("sqlite::memory:")),
            Duration::from_secs(1),
        );
        let db = store.connect().await.unwrap();
        timeout(store.timeout() * 2, store.release(db))
            .await
            .expect("release is bounded");
    }

    #[tokio::test]
    async fn audit_failure_stays_inside_the_task() {
        // No audit_logs table exists in a fresh in-memory database.
        let store = Datastore::new(
            DatabaseTarget::classify(Some("sqlite::memory:")),
            Duration::from_secs(5),
        );
        assert!(matches!(
            store.record_audit(&AuditEntry::db_ping()).await,
            Err(DatastoreError::Query(_))
        ));
        store.spawn_audit(AuditEntry::db_ping()).await.unwrap();
    }
}
