//! Health, readiness and database probes for the Morning AI platform.
//!
//! The service answers a fixed set of JSON routes. Only `/db/ping` and
//! `/api/tenants` touch the external datastore, each over its own short-lived
//! connection.

use std::sync::Arc;
use std::time::Instant;

use crate::config::AppConfig;
use crate::datastore::Datastore;

pub mod api;
pub mod config;
pub mod datastore;
pub mod entity;
pub mod error;
pub mod response;

/// Read-only state shared by every handler.
#[derive(Clone, Debug)]
pub struct AppResources {
    pub config: Arc<AppConfig>,
    pub datastore: Datastore,
    pub started_at: Instant,
}

impl AppResources {
    pub fn new(config: AppConfig) -> Self {
        let datastore = Datastore::from_config(&config);
        Self {
            config: Arc::new(config),
            datastore,
            started_at: Instant::now(),
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
