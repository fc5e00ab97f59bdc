use chrono::{DateTime, Utc};

use crate::model::inventory::{CreateInventoryItemDto, InventoryItemDto, UpdateInventoryItemDto};

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryItem {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub unit: String,
    pub quantity: i32,
    pub reorder_level: i32,
    pub unit_price: f64,
    pub unit_cost: f64,
    pub supplier: Option<String>,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    pub fn from_entity(entity: entity::inventory_item::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            category: entity.category,
            unit: entity.unit,
            quantity: entity.quantity,
            reorder_level: entity.reorder_level,
            unit_price: entity.unit_price,
            unit_cost: entity.unit_cost,
            supplier: entity.supplier,
            is_active: entity.is_active,
            updated_at: entity.updated_at,
        }
    }

    /// Stock at or below the reorder level.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.reorder_level
    }

    pub fn into_dto(self) -> InventoryItemDto {
        let is_low_stock = self.is_low_stock();
        InventoryItemDto {
            id: self.id,
            name: self.name,
            description: self.description,
            category: self.category,
            unit: self.unit,
            quantity: self.quantity,
            reorder_level: self.reorder_level,
            unit_price: self.unit_price,
            unit_cost: self.unit_cost,
            supplier: self.supplier,
            is_active: self.is_active,
            is_low_stock,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateInventoryItemParams {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub unit: String,
    pub quantity: i32,
    pub reorder_level: i32,
    pub unit_price: f64,
    pub unit_cost: f64,
    pub supplier: Option<String>,
}

impl CreateInventoryItemParams {
    pub fn from_dto(dto: CreateInventoryItemDto) -> Self {
        Self {
            name: dto.name.trim().to_string(),
            description: dto.description,
            category: dto.category.trim().to_lowercase(),
            unit: dto.unit,
            quantity: dto.quantity,
            reorder_level: dto.reorder_level,
            unit_price: dto.unit_price,
            unit_cost: dto.unit_cost,
            supplier: dto.supplier,
        }
    }
}

/// Editable inventory fields. Quantity only changes through restock and reservations.
#[derive(Debug, Clone, Default)]
pub struct UpdateInventoryItemParams {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub reorder_level: Option<i32>,
    pub unit_price: Option<f64>,
    pub unit_cost: Option<f64>,
    pub supplier: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateInventoryItemParams {
    pub fn from_dto(dto: UpdateInventoryItemDto) -> Self {
        Self {
            name: dto.name.map(|n| n.trim().to_string()),
            description: dto.description,
            category: dto.category.map(|c| c.trim().to_lowercase()),
            unit: dto.unit,
            reorder_level: dto.reorder_level,
            unit_price: dto.unit_price,
            unit_cost: dto.unit_cost,
            supplier: dto.supplier,
            is_active: dto.is_active,
        }
    }
}

/// A requested quantity of one inventory item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockRequest {
    pub item_id: i32,
    pub quantity: i32,
}
