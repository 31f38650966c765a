use anyhow::anyhow;
use axum::serve;
use futures::TryFutureExt;
use journal::{app, build_app_state, create_dir_all, get_config_info, get_log_level, setup_logger};
use log::{error, info};
use std::{net::SocketAddr, str::FromStr};
use tokio::{net::TcpListener, signal};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = get_config_info();
    let log_level = get_log_level(&cli);

    setup_logger()
        .level(log_level)
        .level_for("journal", log_level)
        .level_for("weather_sources", log_level)
        .level_for("sqlx", log::LevelFilter::Warn)
        .level_for("http_response", log_level)
        .level_for("http_request", log_level)
        .apply()?;

    let database_dir = cli.database_dir();
    let static_dir = cli.static_dir();
    let sources = cli.sources_config();
    let host = cli.host();
    let port = cli.port();

    create_dir_all(&database_dir)
        .map_err(|e| anyhow!("error creating database directory {}: {}", database_dir, e))?;

    let socket_addr = SocketAddr::from_str(&format!("{}:{}", host, port))
        .map_err(|e| anyhow!("invalid address: {}", e))?;

    let listener = TcpListener::bind(socket_addr)
        .map_err(|e| anyhow!("error binding to socket: {}", e))
        .await?;

    info!("Weather Journal starting...");
    info!("  Listen:   http://{}", socket_addr);
    info!("  Docs:     http://{}/docs", socket_addr);
    info!("  Database: {}", database_dir);
    info!("  Static:   {}", static_dir);
    info!(
        "  Upstream: {} | {} | {}",
        sources.geocoding_url, sources.forecast_url, sources.archive_url
    );

    let app_state = build_app_state(static_dir, database_dir, sources)
        .await
        .map_err(|e| {
            error!("error building app: {}", e);
            e
        })?;
    let db = app_state.db.clone();

    let app = app(app_state);

    serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    db.checkpoint().await;
    info!("Weather Journal stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
