//! Migration: Create the items table.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Items::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Items::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Items::Title).string().null())
                    .col(ColumnDef::new(Items::Description).string().null())
                    .col(ColumnDef::new(Items::OwnerId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_items_owner_id")
                            .from(Items::Table, Items::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index for the owner-filtered listing
        manager
            .create_index(
                Index::create()
                    .name("idx_items_owner_id")
                    .table(Items::Table)
                    .col(Items::OwnerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_items_owner_id")
                    .table(Items::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Items::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Items {
    Table,
    Id,
    Title,
    Description,
    OwnerId,
}
