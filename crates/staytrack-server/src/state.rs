use sea_orm::DatabaseConnection;
use std::path::PathBuf;

use crate::config::ServerConfig;
use crate::format::DisplayConfig;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub display: DisplayConfig,
    pub api_url: String,
    /// Root of the static assets; background images live in `images/`.
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: &ServerConfig) -> Self {
        Self {
            db,
            display: config.display,
            api_url: config.api_url.clone(),
            static_dir: config.static_dir.clone(),
        }
    }
}
