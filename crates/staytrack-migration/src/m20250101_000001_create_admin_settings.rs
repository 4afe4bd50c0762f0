use sea_orm_migration::prelude::*;

/// Migration 1: `admin_settings` holds a single row, always with `id = 1`.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdminSettings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AdminSettings::Id).integer().not_null().primary_key())
                    .col(ColumnDef::new(AdminSettings::Title).string_len(100).not_null())
                    .col(
                        ColumnDef::new(AdminSettings::Capacity)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(AdminSettings::EachPersonTime)
                            .big_integer()
                            .not_null()
                            .default(24),
                    )
                    .col(
                        ColumnDef::new(AdminSettings::ActiveGuests)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(AdminSettings::HighestSettlementTime)
                            .big_integer()
                            .not_null()
                            .default(24),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdminSettings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AdminSettings {
    Table,
    Id,
    Title,
    Capacity,
    EachPersonTime,
    ActiveGuests,
    HighestSettlementTime,
}
