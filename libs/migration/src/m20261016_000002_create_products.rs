use sea_orm_migration::{prelude::*, schema::*};

use crate::m20261016_000001_create_warehouses::Warehouses;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Every column but the key is nullable; `name` carries the unique constraint
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(pk_auto(Products::Id))
                    .col(string_null(Products::Name).unique_key())
                    .col(string_null(Products::Type))
                    .col(integer_null(Products::Count))
                    .col(double_null(Products::Price))
                    .col(integer_null(Products::WarehouseId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_warehouse_id")
                            .from(Products::Table, Products::WarehouseId)
                            .to(Warehouses::Table, Warehouses::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_warehouse_id")
                    .table(Products::Table)
                    .col(Products::WarehouseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    Type,
    Count,
    Price,
    WarehouseId,
}
