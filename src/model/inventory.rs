use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InventoryItemDto {
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
    pub is_low_stock: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateInventoryItemDto {
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

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateInventoryItemDto {
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

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RestockDto {
    pub quantity: i32,
}
