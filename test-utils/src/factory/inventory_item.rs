//! Inventory factory for creating stock items.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test inventory items with customizable stock levels.
pub struct InventoryItemFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    quantity: i32,
    reorder_level: i32,
    unit_price: f64,
    is_active: bool,
}

impl<'a> InventoryItemFactory<'a> {
    /// Creates a new factory with defaults: quantity `10`, reorder level `2`,
    /// unit price `5.0`, active.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            name: format!("Item {}", id),
            quantity: 10,
            reorder_level: 2,
            unit_price: 5.0,
            is_active: true,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn quantity(mut self, quantity: i32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn reorder_level(mut self, reorder_level: i32) -> Self {
        self.reorder_level = reorder_level;
        self
    }

    pub fn unit_price(mut self, unit_price: f64) -> Self {
        self.unit_price = unit_price;
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Builds and inserts the inventory item into the database.
    pub async fn build(self) -> Result<entity::inventory_item::Model, DbErr> {
        let now = Utc::now();
        entity::inventory_item::ActiveModel {
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(None),
            category: ActiveValue::Set("parts".to_string()),
            unit: ActiveValue::Set("piece".to_string()),
            quantity: ActiveValue::Set(self.quantity),
            reorder_level: ActiveValue::Set(self.reorder_level),
            unit_price: ActiveValue::Set(self.unit_price),
            unit_cost: ActiveValue::Set(self.unit_price / 2.0),
            supplier: ActiveValue::Set(None),
            is_active: ActiveValue::Set(self.is_active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an inventory item with default values.
pub async fn create_inventory_item(
    db: &DatabaseConnection,
) -> Result<entity::inventory_item::Model, DbErr> {
    InventoryItemFactory::new(db).build().await
}
