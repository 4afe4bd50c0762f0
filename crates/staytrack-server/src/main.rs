use sea_orm_migration::MigratorTrait;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use staytrack_server::config::ServerConfig;
use staytrack_server::{build_router, cors_layer, AppState};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "staytrack_server=info,tower_http=info".into()),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("invalid configuration: {e}");
            std::process::exit(2);
        }
    };

    // Database connection
    let db_config = staytrack_db::DatabaseConfig::from_env();
    tracing::info!("connecting to database...");
    let db = staytrack_db::connect(&db_config)
        .await
        .expect("failed to connect to database");

    // Run migrations
    tracing::info!("running database migrations...");
    staytrack_migration::Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");
    tracing::info!("migrations complete");

    tracing::info!(
        locale = ?config.display.locale,
        utc_offset = %config.display.utc_offset,
        static_dir = %config.static_dir.display(),
        "display settings"
    );

    let state = Arc::new(AppState::new(db, &config));
    let app = build_router(state, cors_layer(&config.cors_origins));

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .expect("failed to bind listen address");
    tracing::info!(addr = %config.bind, "server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
