use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Title given to the settings record when it is first created.
pub const DEFAULT_TITLE: &str = "admin settings";

/// Primary key of the one settings row.
pub const SETTINGS_ID: i32 = 1;

/// The single settings record. `active_guests` is a stored counter kept in
/// step with the `guests` table by check-in, check-out and settings upsert.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "admin_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub title: String,
    pub capacity: i64,
    /// Informational per-person allotment, in hours.
    pub each_person_time: i64,
    pub active_guests: i64,
    /// Stay length in hours after which a guest counts as overdue.
    pub highest_settlement_time: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
