//! Settings Store: the single `admin_settings` record.

use sea_orm::prelude::Expr;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set, TransactionTrait,
};

use crate::error::{ApiError, ApiResult};
use staytrack_db::entities::{admin_settings, guest};

/// Validated settings submission. Every field is a positive whole number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsInput {
    pub capacity: i64,
    pub each_person_time: i64,
    pub highest_settlement_time: i64,
}

impl SettingsInput {
    pub fn new(
        capacity: Option<i64>,
        each_person_time: Option<i64>,
        highest_settlement_time: Option<i64>,
    ) -> ApiResult<Self> {
        let (Some(capacity), Some(each_person_time), Some(highest_settlement_time)) =
            (capacity, each_person_time, highest_settlement_time)
        else {
            return Err(ApiError::Validation("Missing required fields".to_string()));
        };

        for (name, value) in [
            ("capacity", capacity),
            ("each_person_time", each_person_time),
            ("highest_settlement_time", highest_settlement_time),
        ] {
            if value <= 0 {
                return Err(ApiError::Validation(format!(
                    "{name} must be a positive integer"
                )));
            }
        }

        Ok(Self {
            capacity,
            each_person_time,
            highest_settlement_time,
        })
    }
}

/// Return the settings record, or `None` before the first submission.
pub async fn read<C: ConnectionTrait>(db: &C) -> ApiResult<Option<admin_settings::Model>> {
    Ok(admin_settings::Entity::find_by_id(admin_settings::SETTINGS_ID)
        .one(db)
        .await?)
}

/// Like [`read`], but a missing record is a [`ApiError::NotFound`].
pub async fn require<C: ConnectionTrait>(db: &C) -> ApiResult<admin_settings::Model> {
    read(db)
        .await?
        .ok_or_else(|| ApiError::NotFound("Admin settings not found".to_string()))
}

/// Create the settings record or update it in place.
///
/// `active_guests` is rebuilt from the registry size on every call.
pub async fn upsert<C>(db: &C, input: &SettingsInput) -> ApiResult<admin_settings::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;

    // Insert-or-update on the fixed key, so racing first submissions land on
    // one row. The title is only written on insert.
    admin_settings::Entity::insert(admin_settings::ActiveModel {
        id: Set(admin_settings::SETTINGS_ID),
        title: Set(admin_settings::DEFAULT_TITLE.to_string()),
        capacity: Set(input.capacity),
        each_person_time: Set(input.each_person_time),
        active_guests: Set(0),
        highest_settlement_time: Set(input.highest_settlement_time),
    })
    .on_conflict(
        OnConflict::column(admin_settings::Column::Id)
            .update_columns([
                admin_settings::Column::Capacity,
                admin_settings::Column::EachPersonTime,
                admin_settings::Column::HighestSettlementTime,
            ])
            .to_owned(),
    )
    .exec_without_returning(&txn)
    .await?;

    let active_guests = guest::Entity::find().count(&txn).await? as i64;
    admin_settings::Entity::update_many()
        .col_expr(admin_settings::Column::ActiveGuests, Expr::value(active_guests))
        .filter(admin_settings::Column::Id.eq(admin_settings::SETTINGS_ID))
        .exec(&txn)
        .await?;

    let saved = require(&txn).await?;
    txn.commit().await?;

    tracing::info!(
        capacity = saved.capacity,
        highest_settlement_time = saved.highest_settlement_time,
        active_guests = saved.active_guests,
        "settings saved"
    );
    Ok(saved)
}
