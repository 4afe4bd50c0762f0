//! Admin API: settings submission and the settings overview.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::error::ApiResult;
use crate::extract::{int_field, JsonBody};
use crate::occupancy::{self, AdminSummary};
use crate::settings::{self, SettingsInput};
use crate::state::AppState;

// ─── DTOs ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AdminSettingsRequest {
    pub capacity: Option<Value>,
    pub each_person_time: Option<Value>,
    pub highest_settlement_time: Option<Value>,
}

impl AdminSettingsRequest {
    pub fn into_input(self) -> ApiResult<SettingsInput> {
        SettingsInput::new(
            int_field("capacity", self.capacity.as_ref())?,
            int_field("each_person_time", self.each_person_time.as_ref())?,
            int_field("highest_settlement_time", self.highest_settlement_time.as_ref())?,
        )
    }
}

#[derive(Debug, Serialize)]
pub struct AdminSettingsResponse {
    pub title: String,
    pub status: &'static str,
}

// ─── Handlers ───────────────────────────────────────────────────────

/// POST /set_admin_settings/
pub async fn set_admin_settings(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<AdminSettingsRequest>,
) -> ApiResult<Json<AdminSettingsResponse>> {
    let input = body.into_input()?;
    let saved = settings::upsert(&state.db, &input).await?;

    Ok(Json(AdminSettingsResponse {
        title: saved.title,
        status: "success",
    }))
}

/// GET /admin_page/
pub async fn admin_page(State(state): State<Arc<AppState>>) -> ApiResult<Json<AdminSummary>> {
    Ok(Json(occupancy::compute_admin_summary(&state.db).await?))
}
