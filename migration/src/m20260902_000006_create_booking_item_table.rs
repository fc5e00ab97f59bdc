use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260901_000004_create_inventory_item_table::InventoryItem,
    m20260902_000005_create_booking_table::Booking,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BookingItem::Table)
                    .if_not_exists()
                    .col(pk_auto(BookingItem::Id))
                    .col(integer(BookingItem::BookingId))
                    .col(integer(BookingItem::InventoryItemId))
                    .col(integer(BookingItem::Quantity))
                    .col(double(BookingItem::UnitPrice))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_item_booking_id")
                            .from(BookingItem::Table, BookingItem::BookingId)
                            .to(Booking::Table, Booking::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_item_inventory_item_id")
                            .from(BookingItem::Table, BookingItem::InventoryItemId)
                            .to(InventoryItem::Table, InventoryItem::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BookingItem::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum BookingItem {
    Table,
    Id,
    BookingId,
    InventoryItemId,
    Quantity,
    UnitPrice,
}
