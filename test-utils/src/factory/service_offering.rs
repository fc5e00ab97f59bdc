//! Service factory for creating catalogue entries.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test services with customizable fields.
pub struct ServiceOfferingFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    category: String,
    price: f64,
    is_active: bool,
}

impl<'a> ServiceOfferingFactory<'a> {
    /// Creates a new factory with defaults: `"Service {id}"`, category `"plumbing"`,
    /// price `100.0`, active.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            name: format!("Service {}", id),
            category: "plumbing".to_string(),
            price: 100.0,
            is_active: true,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Builds and inserts the service entity into the database.
    pub async fn build(self) -> Result<entity::service_offering::Model, DbErr> {
        let now = Utc::now();
        entity::service_offering::ActiveModel {
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set("Test service".to_string()),
            category: ActiveValue::Set(self.category),
            price: ActiveValue::Set(self.price),
            duration_minutes: ActiveValue::Set(60),
            is_active: ActiveValue::Set(self.is_active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a service with default values.
pub async fn create_service(
    db: &DatabaseConnection,
) -> Result<entity::service_offering::Model, DbErr> {
    ServiceOfferingFactory::new(db).build().await
}
