// Shared test utilities for integration tests
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;
use staytrack_db::entities::admin_settings;
use staytrack_db::DatabaseConfig;
use staytrack_migration::Migrator;
use staytrack_server::format::DisplayConfig;
use staytrack_server::AppState;
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;

/// Fresh in-memory database with the schema applied
pub async fn test_db() -> DatabaseConnection {
    let db = staytrack_db::connect(&DatabaseConfig::in_memory())
        .await
        .expect("in-memory sqlite");
    Migrator::up(&db, None).await.expect("migrations");
    db
}

/// File-backed SQLite database with a real pool, for tests that need two
/// transactions in flight at once
pub async fn test_pooled_db(dir: &Path) -> DatabaseConnection {
    let config = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", dir.join("staytrack.db").display()),
        max_connections: 4,
        min_connections: 1,
        connect_timeout_secs: 8,
        idle_timeout_secs: 300,
    };
    let db = staytrack_db::connect(&config).await.expect("file sqlite");
    Migrator::up(&db, None).await.expect("migrations");
    db
}

/// Create a test AppState with Persian display at +03:30
pub fn test_app_state(db: DatabaseConnection, static_dir: &Path) -> Arc<AppState> {
    Arc::new(AppState {
        db,
        display: DisplayConfig::default(),
        api_url: "http://test.staytrack.local".to_string(),
        static_dir: static_dir.to_path_buf(),
    })
}

/// Insert a settings row directly, bypassing validation
pub async fn insert_settings(
    db: &DatabaseConnection,
    capacity: i64,
    active_guests: i64,
    highest_settlement_time: i64,
) -> admin_settings::Model {
    admin_settings::ActiveModel {
        id: Set(admin_settings::SETTINGS_ID),
        title: Set(admin_settings::DEFAULT_TITLE.to_string()),
        capacity: Set(capacity),
        each_person_time: Set(24),
        active_guests: Set(active_guests),
        highest_settlement_time: Set(highest_settlement_time),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert settings")
}

/// Send one request through the router and decode the JSON reply
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        // The bundled frontend never sets application/json.
        builder = builder.header("content-type", "text/plain;charset=UTF-8");
    }
    let request = builder
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}
