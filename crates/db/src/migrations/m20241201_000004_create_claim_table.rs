//! Create claim table migration.

use sea_orm_migration::prelude::*;

use super::m20241201_000001_create_user_table::User;
use super::m20241201_000003_create_found_item_table::FoundItem;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Claim::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Claim::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Claim::FoundItemId).string_len(32).not_null())
                    .col(ColumnDef::new(Claim::ClaimantId).string_len(128).not_null())
                    .col(ColumnDef::new(Claim::Score).double().not_null())
                    .col(ColumnDef::new(Claim::Status).string_len(16).not_null())
                    .col(ColumnDef::new(Claim::ContactNumber).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Claim::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Claim::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_claim_found_item")
                            .from(Claim::Table, Claim::FoundItemId)
                            .to(FoundItem::Table, FoundItem::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_claim_claimant")
                            .from(Claim::Table, Claim::ClaimantId)
                            .to(User::Table, User::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (claimant_id, found_item_id) - one claim per user per report
        manager
            .create_index(
                Index::create()
                    .name("idx_claim_claimant_found_item")
                    .table(Claim::Table)
                    .col(Claim::ClaimantId)
                    .col(Claim::FoundItemId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: found_item_id (claims on a report)
        manager
            .create_index(
                Index::create()
                    .name("idx_claim_found_item_id")
                    .table(Claim::Table)
                    .col(Claim::FoundItemId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Claim::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Claim {
    Table,
    Id,
    FoundItemId,
    ClaimantId,
    Score,
    Status,
    ContactNumber,
    CreatedAt,
    UpdatedAt,
}
