//! Landing view and health check.

use axum::{extract::State, Json};
use serde::Serialize;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use crate::error::ApiResult;
use crate::settings;
use crate::state::AppState;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];
const DEFAULT_CAPACITY: i64 = 50;
const DEFAULT_EACH_PERSON_TIME: i64 = 24;

#[derive(Debug, Serialize)]
pub struct LandingResponse {
    pub api_url: String,
    pub background_images: Vec<String>,
    pub capacity: i64,
    pub each_person_time: i64,
}

#[derive(Serialize)]
pub struct ApiStatus {
    pub status: &'static str,
    pub version: &'static str,
}

/// Image file names directly under `dir`, sorted. A missing directory is
/// treated as empty.
pub async fn list_background_images(dir: &Path) -> ApiResult<Vec<String>> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(dir = %dir.display(), "background image directory not found");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let mut images = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        let is_image = Path::new(&name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if is_image {
            images.push(name);
        }
    }
    images.sort();
    Ok(images)
}

/// GET /
pub async fn landing(State(state): State<Arc<AppState>>) -> ApiResult<Json<LandingResponse>> {
    let background_images = list_background_images(&state.static_dir.join("images")).await?;
    let current = settings::read(&state.db).await?;

    Ok(Json(LandingResponse {
        api_url: state.api_url.clone(),
        background_images,
        capacity: current.as_ref().map(|s| s.capacity).unwrap_or(DEFAULT_CAPACITY),
        each_person_time: current
            .as_ref()
            .map(|s| s.each_person_time)
            .unwrap_or(DEFAULT_EACH_PERSON_TIME),
    }))
}

/// GET /healthz
pub async fn healthz() -> Json<ApiStatus> {
    Json(ApiStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
