//! Migration: Create the shared catalog table.
//!
//! Exercise types, metcon types and movements live in one table keyed by a
//! `kind` discriminator; names are unique within a kind.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CatalogItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CatalogItems::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CatalogItems::Kind).string().not_null())
                    .col(ColumnDef::new(CatalogItems::Name).string().not_null())
                    .col(ColumnDef::new(CatalogItems::Description).string().null())
                    .col(
                        ColumnDef::new(CatalogItems::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(CatalogItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CatalogItems::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_catalog_items_kind_name")
                    .table(CatalogItems::Table)
                    .col(CatalogItems::Kind)
                    .col(CatalogItems::Name)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CatalogItems::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CatalogItems {
    Table,
    Id,
    Kind,
    Name,
    Description,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
