//! Create found_item table migration.

use sea_orm_migration::prelude::*;

use super::m20241201_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FoundItem::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(FoundItem::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(FoundItem::ReporterId).string_len(128).not_null())
                    .col(ColumnDef::new(FoundItem::ReporterEmail).string_len(256).not_null())
                    .col(ColumnDef::new(FoundItem::ReporterContact).string_len(32))
                    .col(ColumnDef::new(FoundItem::Category).string_len(16).not_null())
                    .col(ColumnDef::new(FoundItem::Name).string_len(256).not_null().default(""))
                    .col(ColumnDef::new(FoundItem::PhotoUrl).text())
                    .col(ColumnDef::new(FoundItem::Location).string_len(256).not_null().default(""))
                    .col(ColumnDef::new(FoundItem::FoundDate).date())
                    .col(
                        ColumnDef::new(FoundItem::Answers)
                            .json_binary()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(FoundItem::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_found_item_reporter")
                            .from(FoundItem::Table, FoundItem::ReporterId)
                            .to(User::Table, User::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (category, found_date) for the search window query
        manager
            .create_index(
                Index::create()
                    .name("idx_found_item_category_found_date")
                    .table(FoundItem::Table)
                    .col(FoundItem::Category)
                    .col(FoundItem::FoundDate)
                    .to_owned(),
            )
            .await?;

        // Index: reporter_id (for "my found items")
        manager
            .create_index(
                Index::create()
                    .name("idx_found_item_reporter_id")
                    .table(FoundItem::Table)
                    .col(FoundItem::ReporterId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FoundItem::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum FoundItem {
    Table,
    Id,
    ReporterId,
    ReporterEmail,
    ReporterContact,
    Category,
    Name,
    PhotoUrl,
    Location,
    FoundDate,
    Answers,
    CreatedAt,
}
