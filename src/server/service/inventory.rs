//! Inventory service.
//!
//! Stock quantities only change through restocking here and through booking
//! reservations in the booking service.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::inventory::InventoryRepository,
    error::AppError,
    model::inventory::{CreateInventoryItemParams, InventoryItem, UpdateInventoryItemParams},
};

pub struct InventoryService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InventoryService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_all(&self, include_inactive: bool) -> Result<Vec<InventoryItem>, AppError> {
        Ok(InventoryRepository::new(self.db)
            .get_all(include_inactive)
            .await?
            .into_iter()
            .map(InventoryItem::from_entity)
            .collect())
    }

    /// Active items at or below their reorder level.
    pub async fn get_low_stock(&self) -> Result<Vec<InventoryItem>, AppError> {
        Ok(InventoryRepository::new(self.db)
            .get_low_stock()
            .await?
            .into_iter()
            .map(InventoryItem::from_entity)
            .collect())
    }

    pub async fn get_by_id(&self, id: i32) -> Result<InventoryItem, AppError> {
        InventoryRepository::new(self.db)
            .find_by_id(id)
            .await?
            .map(InventoryItem::from_entity)
            .ok_or_else(not_found)
    }

    pub async fn create(&self, params: CreateInventoryItemParams) -> Result<InventoryItem, AppError> {
        if params.name.is_empty() {
            return Err(AppError::BadRequest("Item name is required".to_string()));
        }
        if params.quantity < 0 || params.reorder_level < 0 {
            return Err(AppError::BadRequest(
                "Quantity and reorder level cannot be negative".to_string(),
            ));
        }
        validate_prices(Some(params.unit_price), Some(params.unit_cost))?;

        let item = InventoryRepository::new(self.db).create(params).await?;

        tracing::info!(item_id = item.id, quantity = item.quantity, "Inventory item created");

        Ok(InventoryItem::from_entity(item))
    }

    pub async fn update(
        &self,
        id: i32,
        params: UpdateInventoryItemParams,
    ) -> Result<InventoryItem, AppError> {
        if params.name.as_ref().is_some_and(|n| n.is_empty()) {
            return Err(AppError::BadRequest("Item name is required".to_string()));
        }
        if params.reorder_level.is_some_and(|r| r < 0) {
            return Err(AppError::BadRequest(
                "Reorder level cannot be negative".to_string(),
            ));
        }
        validate_prices(params.unit_price, params.unit_cost)?;

        InventoryRepository::new(self.db)
            .update(id, params)
            .await?
            .map(InventoryItem::from_entity)
            .ok_or_else(not_found)
    }

    /// Adds stock to an item.
    ///
    /// # Returns
    /// - `Ok(InventoryItem)` - Item with its new quantity
    /// - `Err(AppError::BadRequest)` - Quantity is not positive or the total would overflow
    /// - `Err(AppError::NotFound)` - No such item
    pub async fn restock(&self, id: i32, quantity: i32) -> Result<InventoryItem, AppError> {
        if quantity <= 0 {
            return Err(AppError::BadRequest(
                "Restock quantity must be positive".to_string(),
            ));
        }

        let repo = InventoryRepository::new(self.db);
        if !repo.add_stock(id, quantity).await? {
            return match repo.find_by_id(id).await? {
                Some(_) => Err(AppError::BadRequest(
                    "Restock would exceed the maximum stock quantity".to_string(),
                )),
                None => Err(not_found()),
            };
        }

        tracing::info!(item_id = id, quantity, "Inventory restocked");

        self.get_by_id(id).await
    }

    pub async fn deactivate(&self, id: i32) -> Result<(), AppError> {
        if !InventoryRepository::new(self.db).deactivate(id).await? {
            return Err(not_found());
        }
        Ok(())
    }
}

fn validate_prices(unit_price: Option<f64>, unit_cost: Option<f64>) -> Result<(), AppError> {
    let invalid = |v: f64| !v.is_finite() || v < 0.0;
    if unit_price.is_some_and(invalid) || unit_cost.is_some_and(invalid) {
        return Err(AppError::BadRequest(
            "Prices cannot be negative".to_string(),
        ));
    }
    Ok(())
}

fn not_found() -> AppError {
    AppError::NotFound("Inventory item not found".to_string())
}
