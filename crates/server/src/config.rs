use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::datastore::DatabaseTarget;

/// Placeholder reported by `/health` when no commit is known.
pub const UNKNOWN_COMMIT: &str = "unknown";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration build error: {0}")]
    Build(#[from] config::ConfigError),
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Process configuration, read once at startup and shared read-only.
///
/// Keys map one-to-one onto environment variables (`DATABASE_URL`, `PORT`,
/// `RENDER_GIT_COMMIT`, ...) and onto the optional `config.yaml`.
#[derive(Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Read for parity with the deployment environment; never surfaced.
    #[serde(default)]
    pub supabase_url: Option<String>,
    #[serde(default)]
    pub supabase_anon_key: Option<String>,
    #[serde(default)]
    pub render_git_commit: Option<String>,
    #[serde(default = "default_environment")]
    pub environment: String,
    #[serde(default = "default_service_name")]
    pub service_name: String,
    /// Upper bound for a single connect or query against the datastore.
    #[serde(default = "default_db_timeout_secs")]
    pub db_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_environment() -> String {
    "production".to_string()
}

fn default_service_name() -> String {
    "morningai-core-api".to_string()
}

fn default_db_timeout_secs() -> u64 {
    5
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            host: default_host(),
            port: default_port(),
            supabase_url: None,
            supabase_anon_key: None,
            render_git_commit: None,
            environment: default_environment(),
            service_name: default_service_name(),
            db_timeout_secs: default_db_timeout_secs(),
        }
    }
}

impl AppConfig {
    pub fn database_target(&self) -> DatabaseTarget {
        DatabaseTarget::classify(self.database_url.as_deref())
    }

    pub fn db_timeout(&self) -> Duration {
        Duration::from_secs(self.db_timeout_secs)
    }

    /// Commit to report in `/health`; blank values count as unknown.
    pub fn commit(&self) -> &str {
        self.render_git_commit
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(UNKNOWN_COMMIT)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Validation("port must be > 0".into()));
        }
        if self.db_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "db_timeout_secs must be > 0".into(),
            ));
        }
        if self.service_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "service_name must not be empty".into(),
            ));
        }
        Ok(())
    }
}

// Secrets stay out of logs.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("database", &self.database_target())
            .field("host", &self.host)
            .field("port", &self.port)
            .field("supabase_url", &self.supabase_url)
            .field(
                "supabase_anon_key",
                &self.supabase_anon_key.as_ref().map(|_| "<redacted>"),
            )
            .field("render_git_commit", &self.render_git_commit)
            .field("environment", &self.environment)
            .field("service_name", &self.service_name)
            .field("db_timeout_secs", &self.db_timeout_secs)
            .finish()
    }
}

/// Load application configuration from `.env`, an optional `config.yaml` and
/// the process environment, in increasing order of precedence.
///
/// Environment keys are matched case-insensitively against the field names, so
/// `DATABASE_URL` sets `database_url`. Empty variables are ignored.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    use config::{Config, Environment, File};

    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "failed to read .env file"),
    }

    let cfg = Config::builder()
        .add_source(File::with_name("config.yaml").required(false))
        .add_source(Environment::default().ignore_empty(true))
        .build()?;

    load_config_from(cfg)
}

/// Deserialize and validate an already-assembled configuration.
pub fn load_config_from(cfg: config::Config) -> Result<AppConfig, ConfigError> {
    let app: AppConfig = cfg.try_deserialize()?;
    app.validate()?;
    Ok(app)
}
