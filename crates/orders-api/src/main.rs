use anyhow::{Context, Result};
use dotenv::dotenv;
use orders_api::{config::Config, handler::AppRouter, state::AppState};
use shared::{
    config::ConnectionManager,
    utils::{LogOptions, Telemetry, init_logger},
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = Telemetry::init("orders-api", config.otel_endpoint.as_deref())
        .context("Failed to initialize telemetry")?;

    let _log_guard = init_logger(
        LogOptions {
            component: "orders-api",
            is_dev: config.debug,
            enable_file: config.enable_file_log,
        },
        telemetry.logger_provider(),
    )
    .context("Failed to initialize logger")?;

    info!(environment = ?config.app_env, "⚙️ Configuration loaded");

    let pool = ConnectionManager::new_pool(
        &config.database_url,
        config.db_min_conn,
        config.db_max_conn,
    )
    .await
    .context("Failed to connect to database")?;

    if config.run_migrations {
        info!("Running migrations...");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run database migrations")?;
        info!("Migrations completed successfully");
    }

    let state = AppState::new(pool, &config).context("Failed to create AppState")?;

    AppRouter::serve(config.port, state)
        .await
        .context("Failed to start server")?;

    info!("Shutting down servers...");

    telemetry.shutdown()?;

    Ok(())
}
