use anyhow::Context;
use dotenvy::dotenv;
use tracing::{info, warn};

use coursedesk::coursedesk_config::AppConfig;
use coursedesk::coursedesk_core::errors::{ErrorDetail, set_error_detail};
use coursedesk::coursedesk_db::run_migrations;
use coursedesk::logging::init_tracing;
use coursedesk::metrics::init_metrics;
use coursedesk::router::init_router_with_metrics;
use coursedesk::state::init_app_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = AppConfig::from_env().context("Invalid configuration")?;
    let _log_guard = init_tracing(&config.log);

    set_error_detail(if config.server.is_production() {
        ErrorDetail::Hidden
    } else {
        ErrorDetail::Verbose
    });

    if config.jwt.uses_default_secret() {
        warn!("JWT_SECRET is not set; using the development default");
    }

    let state = init_app_state(&config)
        .await
        .context("Failed to connect to the database")?;

    if config.database.run_migrations {
        run_migrations(&state.db)
            .await
            .context("Failed to run database migrations")?;
    }

    let metrics = init_metrics(config.server.metrics_enabled)
        .context("Failed to install the metrics recorder")?;
    let app = init_router_with_metrics(state, metrics);

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    info!(
        address = %address,
        environment = %config.server.environment,
        "Server running; docs at /swagger-ui and /scalar"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
    }
}
