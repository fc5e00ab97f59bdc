use crate::server::data::inventory::InventoryRepository;
use sea_orm::{DbErr, EntityTrait};
use test_utils::{builder::TestBuilder, factory};

mod add_stock;
mod get_low_stock;
mod reserve;

async fn quantity_of(db: &sea_orm::DatabaseConnection, id: i32) -> Result<i32, DbErr> {
    let item = entity::prelude::InventoryItem::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("inventory item".to_string()))?;
    Ok(item.quantity)
}
