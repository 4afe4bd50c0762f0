use sea_orm_migration::prelude::*;

/// Migration 2: `guests` holds one row per guest on the premises.
///
/// `uid` is the operator-facing identifier and is unique; check-in relies on
/// the index to settle two concurrent registrations of the same person.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(guests_table()).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_guests_enter_time")
                    .table(Guests::Table)
                    .col(Guests::EnterTime)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Guests::Table).to_owned())
            .await
    }
}

/// Names are free text of any length.
pub(crate) fn guests_table() -> TableCreateStatement {
    Table::create()
        .table(Guests::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Guests::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Guests::Name).text().not_null())
        .col(ColumnDef::new(Guests::Family).text().not_null())
        .col(ColumnDef::new(Guests::Uid).big_integer().not_null().unique_key())
        .col(
            ColumnDef::new(Guests::EnterTime)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .col(ColumnDef::new(Guests::FormattedEnterTime).string_len(50).not_null())
        .col(ColumnDef::new(Guests::DurationSecs).big_integer().null())
        .col(ColumnDef::new(Guests::FormattedDuration).string_len(100).not_null())
        .to_owned()
}

#[derive(DeriveIden)]
pub enum Guests {
    Table,
    Id,
    Name,
    Family,
    Uid,
    EnterTime,
    FormattedEnterTime,
    DurationSecs,
    FormattedDuration,
}
