use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InventoryItem::Table)
                    .if_not_exists()
                    .col(pk_auto(InventoryItem::Id))
                    .col(string(InventoryItem::Name))
                    .col(text_null(InventoryItem::Description))
                    .col(string(InventoryItem::Category))
                    .col(string(InventoryItem::Unit))
                    .col(integer(InventoryItem::Quantity).default(0))
                    .col(integer(InventoryItem::ReorderLevel).default(0))
                    .col(double(InventoryItem::UnitPrice))
                    .col(double(InventoryItem::UnitCost))
                    .col(string_null(InventoryItem::Supplier))
                    .col(boolean(InventoryItem::IsActive).default(true))
                    .col(
                        timestamp(InventoryItem::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp(InventoryItem::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InventoryItem::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum InventoryItem {
    Table,
    Id,
    Name,
    Description,
    Category,
    Unit,
    Quantity,
    ReorderLevel,
    UnitPrice,
    UnitCost,
    Supplier,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
