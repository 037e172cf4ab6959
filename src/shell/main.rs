use budget_tracker_api::shell::bootstrap::{connector_for, run, shutdown_signal};
use budget_tracker_api::shell::config::AppConfig;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "budget_tracker_api=info,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::from_env()?;
    let connector = connector_for(&config);
    run(config, connector, shutdown_signal()).await
}
