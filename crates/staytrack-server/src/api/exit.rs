//! Exit pages: occupancy status, duration refresh and check-out.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::error::ApiResult;
use crate::extract::{digits_field, JsonBody};
use crate::occupancy::{self, OccupancyStatus};
use crate::registry::{self, CheckOutOutcome};
use crate::state::AppState;
use staytrack_db::entities::guest;

// ─── DTOs ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct GuestListResponse {
    #[serde(rename = "Data")]
    pub data: Vec<guest::Model>,
}

#[derive(Debug, Deserialize)]
pub struct SetExitRequest {
    #[serde(rename = "UID")]
    pub uid: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct SetExitResponse {
    pub status: &'static str,
}

// ─── Handlers ───────────────────────────────────────────────────────

/// GET /exit_page/
pub async fn exit_page(State(state): State<Arc<AppState>>) -> ApiResult<Json<OccupancyStatus>> {
    Ok(Json(occupancy::compute_status(&state.db).await?))
}

/// GET /set_exit_page/: refresh every guest's duration and list them
pub async fn set_exit_page(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<GuestListResponse>> {
    let data = registry::refresh_durations(&state.db, state.display.locale, Utc::now()).await?;
    Ok(Json(GuestListResponse { data }))
}

/// POST /set_exit/
pub async fn set_exit(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<SetExitRequest>,
) -> ApiResult<Json<SetExitResponse>> {
    // Only bare digits identify a guest on check-out.
    let uid = registry::checkout_uid(digits_field(body.uid.as_ref()))?;

    let status = match registry::check_out(&state.db, uid).await? {
        CheckOutOutcome::Removed => "person removed",
        CheckOutOutcome::NoSuchGuest => "there is no such person",
    };
    Ok(Json(SetExitResponse { status }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_set_exit_request_keeps_raw_uid() {
        let req: SetExitRequest = serde_json::from_str(r#"{"UID": " 7 "}"#).unwrap();
        assert_eq!(req.uid, Some(Value::String(" 7 ".into())));
        assert!(registry::checkout_uid(digits_field(req.uid.as_ref())).is_err());

        let req: SetExitRequest = serde_json::from_str(r#"{"UID": "7"}"#).unwrap();
        assert_eq!(registry::checkout_uid(digits_field(req.uid.as_ref())).unwrap(), 7);

        let req: SetExitRequest = serde_json::from_str("{}").unwrap();
        assert!(req.uid.is_none());
    }

    #[test]
    fn test_guest_list_response_serialization() {
        let resp = GuestListResponse {
            data: vec![guest::Model {
                id: 1,
                name: "Ali".into(),
                family: "Rahimi".into(),
                uid: 5,
                enter_time: Utc.with_ymd_and_hms(2024, 3, 20, 8, 0, 0).unwrap(),
                formatted_enter_time: "1403/01/01 - 11:30 ق.ظ".into(),
                duration_secs: Some(60),
                formatted_duration: "1 دقیقه".into(),
            }],
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["Data"][0]["UID"], 5);
        assert_eq!(json["Data"][0]["duration"], 60);
        assert_eq!(json["Data"][0]["formated_duration"], "1 دقیقه");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_set_exit_response_serialization() {
        let json = serde_json::to_value(SetExitResponse {
            status: "person removed",
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"status": "person removed"}));
    }
}
