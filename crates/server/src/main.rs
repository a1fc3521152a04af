use morningai_api::AppResources;
use morningai_api::api::{openapi_document, start_webserver};
use morningai_api::config::load_config;
use std::env;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn initialize_tracing() {
    let default_directives = "morningai_api=info,tower_http=info,sea_orm=warn,sqlx=warn";
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    let layer = fmt::layer().with_target(true).with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layer)
        .init();
}

#[tokio::main]
async fn main() -> color_eyre::eyre::Result<()> {
    color_eyre::install()?;

    if env::args().skip(1).any(|arg| arg == "--print-openapi") {
        println!("{}", openapi_document().to_pretty_json()?);
        return Ok(());
    }

    initialize_tracing();

    let config = load_config()?;
    tracing::info!(
        database = ?config.database_target(),
        environment = %config.environment,
        service = %config.service_name,
        commit = %config.commit(),
        supabase_configured = config.supabase_url.is_some(),
        db_timeout_secs = config.db_timeout_secs,
        "configuration loaded"
    );
    if !config.database_target().is_live() {
        tracing::warn!(
            "DATABASE_URL is not a database connection string; db probes run in degraded mode"
        );
    }

    start_webserver(AppResources::new(config)).await?;
    Ok(())
}
