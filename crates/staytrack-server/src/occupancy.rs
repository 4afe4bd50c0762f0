//! Occupancy Policy: how full the premises are and who has overstayed.

use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::settings;
use staytrack_db::entities::guest;

/// Occupancy at or above this percentage counts as near full.
pub const NEAR_FULL_PERCENT: i64 = 95;

const SECONDS_PER_HOUR: i64 = 3_600;

/// Response of the exit page. Keys follow what the bundled frontend reads.
#[derive(Debug, Serialize)]
pub struct OccupancyStatus {
    pub highest_settlement_time: i64,
    #[serde(rename = "capactiy")]
    pub capacity: i64,
    pub active_guests: i64,
    /// Occupancy percentage with two decimals, e.g. `"95.00"`.
    pub percent: String,
    #[serde(rename = "completed_95")]
    pub near_full: bool,
    /// Overdue guests, oldest entry first. Empty unless near full.
    #[serde(rename = "users")]
    pub overdue_guests: Vec<guest::Model>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct AdminSummary {
    pub active_guests: i64,
    pub capacity: i64,
    pub highest_settlement_time: i64,
}

/// Percentage string and near-full flag for `active` guests out of `capacity`.
pub fn completion(active_guests: i64, capacity: i64) -> ApiResult<(String, bool)> {
    if capacity <= 0 {
        return Err(ApiError::CapacityUnset);
    }
    let percent = active_guests as f64 * 100.0 / capacity as f64;
    // Integer comparison keeps 95/100 exactly on the threshold.
    let near_full =
        i128::from(active_guests) * 100 >= i128::from(capacity) * i128::from(NEAR_FULL_PERCENT);
    Ok((format!("{percent:.2}"), near_full))
}

/// Guests whose last refreshed stay exceeds `hours`, oldest entry first.
pub async fn overdue_guests<C: ConnectionTrait>(
    db: &C,
    hours: i64,
) -> ApiResult<Vec<guest::Model>> {
    let threshold = hours.saturating_mul(SECONDS_PER_HOUR);
    Ok(guest::Entity::find()
        .filter(guest::Column::DurationSecs.gt(threshold))
        .order_by_asc(guest::Column::EnterTime)
        .all(db)
        .await?)
}

/// Occupancy from the stored settings counter, plus the overdue list when
/// the premises are near full.
pub async fn compute_status<C: ConnectionTrait>(db: &C) -> ApiResult<OccupancyStatus> {
    let current = settings::require(db).await?;
    let (percent, near_full) = completion(current.active_guests, current.capacity)?;

    let overdue_guests = if near_full {
        overdue_guests(db, current.highest_settlement_time).await?
    } else {
        Vec::new()
    };

    if near_full {
        tracing::info!(
            percent = %percent,
            overdue = overdue_guests.len(),
            "occupancy near capacity"
        );
    }

    Ok(OccupancyStatus {
        highest_settlement_time: current.highest_settlement_time,
        capacity: current.capacity,
        active_guests: current.active_guests,
        percent,
        near_full,
        overdue_guests,
    })
}

/// Settings overview. `active_guests` is the live registry count, which may
/// differ from the stored counter.
pub async fn compute_admin_summary<C: ConnectionTrait>(db: &C) -> ApiResult<AdminSummary> {
    let current = settings::require(db).await?;
    let active_guests = guest::Entity::find().count(db).await? as i64;

    Ok(AdminSummary {
        active_guests,
        capacity: current.capacity,
        highest_settlement_time: current.highest_settlement_time,
    })
}
