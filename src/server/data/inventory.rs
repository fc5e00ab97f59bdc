//! Inventory repository, including the conditional stock updates used by bookings.

use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, ExprTrait},
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::server::model::inventory::{CreateInventoryItemParams, UpdateInventoryItemParams};

pub struct InventoryRepository<'a, C = DatabaseConnection> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> InventoryRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_all(
        &self,
        include_inactive: bool,
    ) -> Result<Vec<entity::inventory_item::Model>, DbErr> {
        let mut query = entity::prelude::InventoryItem::find();
        if !include_inactive {
            query = query.filter(entity::inventory_item::Column::IsActive.eq(true));
        }

        query
            .order_by_asc(entity::inventory_item::Column::Category)
            .order_by_asc(entity::inventory_item::Column::Name)
            .all(self.db)
            .await
    }

    /// Active items whose quantity is at or below their reorder level, lowest stock first.
    pub async fn get_low_stock(&self) -> Result<Vec<entity::inventory_item::Model>, DbErr> {
        entity::prelude::InventoryItem::find()
            .filter(entity::inventory_item::Column::IsActive.eq(true))
            .filter(
                Expr::col(entity::inventory_item::Column::Quantity)
                    .lte(Expr::col(entity::inventory_item::Column::ReorderLevel)),
            )
            .order_by_asc(entity::inventory_item::Column::Quantity)
            .all(self.db)
            .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::inventory_item::Model>, DbErr> {
        entity::prelude::InventoryItem::find_by_id(id)
            .one(self.db)
            .await
    }

    pub async fn find_many(&self, ids: Vec<i32>) -> Result<Vec<entity::inventory_item::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::InventoryItem::find()
            .filter(entity::inventory_item::Column::Id.is_in(ids))
            .all(self.db)
            .await
    }

    pub async fn create(
        &self,
        params: CreateInventoryItemParams,
    ) -> Result<entity::inventory_item::Model, DbErr> {
        let now = Utc::now();
        entity::inventory_item::ActiveModel {
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            category: ActiveValue::Set(params.category),
            unit: ActiveValue::Set(params.unit),
            quantity: ActiveValue::Set(params.quantity),
            reorder_level: ActiveValue::Set(params.reorder_level),
            unit_price: ActiveValue::Set(params.unit_price),
            unit_cost: ActiveValue::Set(params.unit_cost),
            supplier: ActiveValue::Set(params.supplier),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Applies the provided fields; returns `None` when the item does not exist.
    pub async fn update(
        &self,
        id: i32,
        params: UpdateInventoryItemParams,
    ) -> Result<Option<entity::inventory_item::Model>, DbErr> {
        let Some(item) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active_model: entity::inventory_item::ActiveModel = item.into();
        if let Some(name) = params.name {
            active_model.name = ActiveValue::Set(name);
        }
        if let Some(description) = params.description {
            active_model.description = ActiveValue::Set(Some(description));
        }
        if let Some(category) = params.category {
            active_model.category = ActiveValue::Set(category);
        }
        if let Some(unit) = params.unit {
            active_model.unit = ActiveValue::Set(unit);
        }
        if let Some(reorder_level) = params.reorder_level {
            active_model.reorder_level = ActiveValue::Set(reorder_level);
        }
        if let Some(unit_price) = params.unit_price {
            active_model.unit_price = ActiveValue::Set(unit_price);
        }
        if let Some(unit_cost) = params.unit_cost {
            active_model.unit_cost = ActiveValue::Set(unit_cost);
        }
        if let Some(supplier) = params.supplier {
            active_model.supplier = ActiveValue::Set(Some(supplier));
        }
        if let Some(is_active) = params.is_active {
            active_model.is_active = ActiveValue::Set(is_active);
        }
        active_model.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(active_model.update(self.db).await?))
    }

    /// Takes `quantity` units from an active item if enough stock remains.
    ///
    /// The decrement and the stock check happen in one `UPDATE ... WHERE quantity >= n`,
    /// so concurrent reservations can never drive the quantity negative.
    ///
    /// # Returns
    /// - `Ok(true)` - Stock decremented
    /// - `Ok(false)` - Item missing, inactive, or short of stock; nothing changed
    pub async fn reserve(&self, id: i32, quantity: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::InventoryItem::update_many()
            .col_expr(
                entity::inventory_item::Column::Quantity,
                Expr::col(entity::inventory_item::Column::Quantity).sub(quantity),
            )
            .col_expr(
                entity::inventory_item::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .filter(entity::inventory_item::Column::Id.eq(id))
            .filter(entity::inventory_item::Column::IsActive.eq(true))
            .filter(entity::inventory_item::Column::Quantity.gte(quantity))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Adds `quantity` units back to an item, active or not.
    ///
    /// Used both for restocking and for returning a cancelled booking's reservation.
    ///
    /// # Returns
    /// - `Ok(true)` - Stock incremented
    /// - `Ok(false)` - No such item, or the new quantity would not fit in an `i32`
    pub async fn add_stock(&self, id: i32, quantity: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::InventoryItem::update_many()
            .col_expr(
                entity::inventory_item::Column::Quantity,
                Expr::col(entity::inventory_item::Column::Quantity).add(quantity),
            )
            .col_expr(
                entity::inventory_item::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .filter(entity::inventory_item::Column::Id.eq(id))
            .filter(
                entity::inventory_item::Column::Quantity.lte(i32::MAX.saturating_sub(quantity)),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Soft-deletes an item so it can no longer be reserved.
    pub async fn deactivate(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::InventoryItem::update_many()
            .col_expr(entity::inventory_item::Column::IsActive, Expr::value(false))
            .col_expr(
                entity::inventory_item::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .filter(entity::inventory_item::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
