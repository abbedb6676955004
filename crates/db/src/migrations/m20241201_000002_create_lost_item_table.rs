//! Create lost_item table migration.

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
                    .table(LostItem::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(LostItem::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(LostItem::UserId).string_len(128).not_null())
                    .col(ColumnDef::new(LostItem::UserEmail).string_len(256).not_null())
                    .col(ColumnDef::new(LostItem::Category).string_len(16).not_null())
                    .col(ColumnDef::new(LostItem::Name).string_len(256).not_null())
                    .col(ColumnDef::new(LostItem::Location).string_len(256).not_null())
                    .col(ColumnDef::new(LostItem::LostDate).date().not_null())
                    .col(ColumnDef::new(LostItem::Description).text().not_null())
                    .col(
                        ColumnDef::new(LostItem::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lost_item_user")
                            .from(LostItem::Table, LostItem::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: user_id (search gate and "my lost items")
        manager
            .create_index(
                Index::create()
                    .name("idx_lost_item_user_id")
                    .table(LostItem::Table)
                    .col(LostItem::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LostItem::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum LostItem {
    Table,
    Id,
    UserId,
    UserEmail,
    Category,
    Name,
    Location,
    LostDate,
    Description,
    CreatedAt,
}
