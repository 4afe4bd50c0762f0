//! Guest check-in API.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::error::ApiResult;
use crate::extract::{int_field, text_field, JsonBody};
use crate::registry::{self, CheckIn, CheckInOutcome};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetGuestRequest {
    #[serde(rename = "UID")]
    pub uid: Option<Value>,
    pub name: Option<Value>,
    pub family: Option<Value>,
}

impl SetGuestRequest {
    pub fn into_check_in(self) -> ApiResult<CheckIn> {
        CheckIn::new(
            int_field("UID", self.uid.as_ref())?,
            text_field(self.name.as_ref()),
            text_field(self.family.as_ref()),
        )
    }
}

#[derive(Debug, Serialize)]
pub struct SetGuestResponse {
    #[serde(rename = "UID", skip_serializing_if = "Option::is_none")]
    pub uid: Option<i64>,
    pub status: &'static str,
}

/// POST /set_guest/
pub async fn set_guest(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<SetGuestRequest>,
) -> ApiResult<(StatusCode, Json<SetGuestResponse>)> {
    let request = body.into_check_in()?;

    match registry::check_in(&state.db, &state.display, request, Utc::now()).await? {
        CheckInOutcome::Created(guest) => Ok((
            StatusCode::CREATED,
            Json(SetGuestResponse {
                uid: Some(guest.uid),
                status: "created",
            }),
        )),
        CheckInOutcome::AlreadyPresent => Ok((
            StatusCode::OK,
            Json(SetGuestResponse {
                uid: None,
                status: "created before",
            }),
        )),
    }
}
