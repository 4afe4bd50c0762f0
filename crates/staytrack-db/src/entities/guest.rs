use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A guest currently on the premises. The row is deleted on check-out.
///
/// The serialized field names follow what the bundled frontend reads
/// (`UID`, `formated_enter_time`, `formated_duration`).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "guests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub family: String,
    #[sea_orm(unique)]
    #[serde(rename = "UID")]
    pub uid: i64,
    pub enter_time: DateTimeUtc,
    #[serde(rename = "formated_enter_time")]
    pub formatted_enter_time: String,
    /// Elapsed stay in whole seconds, `None` until the first refresh sweep.
    #[serde(rename = "duration")]
    pub duration_secs: Option<i64>,
    #[serde(rename = "formated_duration")]
    pub formatted_duration: String,
}

impl Model {
    pub fn duration(&self) -> Option<chrono::TimeDelta> {
        self.duration_secs.map(chrono::TimeDelta::seconds)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
