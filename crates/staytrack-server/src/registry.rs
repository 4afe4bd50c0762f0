//! Guest Registry: check-in, duration refresh and check-out.
//!
//! Every mutation of the `guests` table moves `admin_settings.active_guests`
//! inside the same transaction, using an in-SQL increment so concurrent
//! requests cannot lose an update.

use chrono::{DateTime, TimeDelta, Utc};
use sea_orm::prelude::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr, TransactionTrait,
};

use crate::error::{ApiError, ApiResult};
use crate::format::{format_duration_span, format_entry_timestamp, DisplayConfig, DisplayLocale};
use staytrack_db::entities::{admin_settings, guest};

/// Validated check-in request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckIn {
    pub uid: i64,
    pub name: String,
    pub family: String,
}

impl CheckIn {
    pub fn new(uid: Option<i64>, name: Option<String>, family: Option<String>) -> ApiResult<Self> {
        let (Some(uid), Some(name), Some(family)) = (uid, name, family) else {
            return Err(ApiError::Validation("Missing required fields".to_string()));
        };
        if uid == 0 {
            return Err(ApiError::Validation("Missing required fields".to_string()));
        }
        if uid < 0 {
            return Err(ApiError::Validation("UID must be a positive integer".to_string()));
        }
        Ok(Self { uid, name, family })
    }
}

#[derive(Debug)]
pub enum CheckInOutcome {
    Created(guest::Model),
    /// A guest with this UID is already present; nothing was changed.
    AlreadyPresent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutOutcome {
    Removed,
    NoSuchGuest,
}

/// Check-out identifiers must be positive whole numbers.
pub fn checkout_uid(uid: Option<i64>) -> ApiResult<i64> {
    match uid {
        Some(uid) if uid > 0 => Ok(uid),
        _ => Err(ApiError::Validation("Invalid UID".to_string())),
    }
}

/// Register a guest entering at `now`.
pub async fn check_in<C>(
    db: &C,
    display: &DisplayConfig,
    request: CheckIn,
    now: DateTime<Utc>,
) -> ApiResult<CheckInOutcome>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;

    // The unique index on `uid` decides duplicates, so the insert is the
    // first statement and takes the write lock up front.
    let inserted = guest::ActiveModel {
        name: Set(request.name),
        family: Set(request.family),
        uid: Set(request.uid),
        enter_time: Set(now),
        formatted_enter_time: Set(format_entry_timestamp(Some(now), display)),
        duration_secs: Set(None),
        formatted_duration: Set(display.locale.zero_duration()),
        ..Default::default()
    }
    .insert(&txn)
    .await;

    let created = match inserted {
        Ok(created) => created,
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            txn.rollback().await?;
            tracing::debug!(uid = request.uid, "guest already checked in");
            return Ok(CheckInOutcome::AlreadyPresent);
        }
        Err(e) => return Err(e.into()),
    };

    let counted = admin_settings::Entity::update_many()
        .col_expr(
            admin_settings::Column::ActiveGuests,
            Expr::col(admin_settings::Column::ActiveGuests).add(1),
        )
        .exec(&txn)
        .await?;

    txn.commit().await?;

    if counted.rows_affected == 0 {
        tracing::warn!(
            uid = created.uid,
            "guest checked in before any settings were saved; active count rebuilds on the next settings update"
        );
    }
    tracing::info!(uid = created.uid, "guest checked in");
    Ok(CheckInOutcome::Created(created))
}

/// Recompute `duration` for every present guest as `now - enter_time`.
///
/// Guests whose entry time lies after `now` are anomalies (clock change or
/// bad import); they are logged and returned unchanged. Each guest is
/// written on its own, and one checked out mid-sweep is left out.
pub async fn refresh_durations<C: ConnectionTrait>(
    db: &C,
    locale: DisplayLocale,
    now: DateTime<Utc>,
) -> ApiResult<Vec<guest::Model>> {
    let guests = guest::Entity::find()
        .order_by_asc(guest::Column::Id)
        .all(db)
        .await?;

    let mut refreshed = Vec::with_capacity(guests.len());
    for mut g in guests {
        let elapsed = now.signed_duration_since(g.enter_time);
        if elapsed < TimeDelta::zero() {
            tracing::warn!(
                guest_id = g.id,
                uid = g.uid,
                enter_time = %g.enter_time,
                "guest entry time is in the future, skipping duration refresh"
            );
            refreshed.push(g);
            continue;
        }

        g.duration_secs = Some(elapsed.num_seconds());
        g.formatted_duration = format_duration_span(g.duration(), locale);

        let written = guest::Entity::update_many()
            .col_expr(guest::Column::DurationSecs, Expr::value(g.duration_secs))
            .col_expr(
                guest::Column::FormattedDuration,
                Expr::value(g.formatted_duration.clone()),
            )
            .filter(guest::Column::Id.eq(g.id))
            .exec(db)
            .await?;
        if written.rows_affected > 0 {
            refreshed.push(g);
        }
    }

    tracing::debug!(count = refreshed.len(), "guest durations refreshed");
    Ok(refreshed)
}

/// Remove the guest with `uid`, decrementing the active count.
///
/// Only the transaction whose delete removed the row touches the counter,
/// so concurrent check-outs of one guest decrement it once.
pub async fn check_out<C>(db: &C, uid: i64) -> ApiResult<CheckOutOutcome>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;

    let deleted = guest::Entity::delete_many()
        .filter(guest::Column::Uid.eq(uid))
        .exec(&txn)
        .await?;
    if deleted.rows_affected == 0 {
        txn.rollback().await?;
        return Ok(CheckOutOutcome::NoSuchGuest);
    }

    admin_settings::Entity::update_many()
        .col_expr(
            admin_settings::Column::ActiveGuests,
            Expr::col(admin_settings::Column::ActiveGuests).sub(1),
        )
        .filter(admin_settings::Column::ActiveGuests.gt(0))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    tracing::info!(uid, "guest checked out");
    Ok(CheckOutOutcome::Removed)
}
