use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::service_offering::{
    CreateServiceOfferingParams, UpdateServiceOfferingParams,
};

pub struct ServiceOfferingRepository<'a, C = DatabaseConnection> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ServiceOfferingRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Lists services ordered by category then name.
    ///
    /// # Arguments
    /// - `category` - Restrict to one category
    /// - `include_inactive` - Also return deactivated services
    pub async fn get_all(
        &self,
        category: Option<&str>,
        include_inactive: bool,
    ) -> Result<Vec<entity::service_offering::Model>, DbErr> {
        let mut query = entity::prelude::ServiceOffering::find();
        if let Some(category) = category {
            query = query.filter(entity::service_offering::Column::Category.eq(category));
        }
        if !include_inactive {
            query = query.filter(entity::service_offering::Column::IsActive.eq(true));
        }

        query
            .order_by_asc(entity::service_offering::Column::Category)
            .order_by_asc(entity::service_offering::Column::Name)
            .all(self.db)
            .await
    }

    /// Distinct categories of active services, sorted.
    pub async fn get_categories(&self) -> Result<Vec<String>, DbErr> {
        entity::prelude::ServiceOffering::find()
            .select_only()
            .column(entity::service_offering::Column::Category)
            .distinct()
            .filter(entity::service_offering::Column::IsActive.eq(true))
            .order_by_asc(entity::service_offering::Column::Category)
            .into_tuple::<String>()
            .all(self.db)
            .await
    }

    pub async fn find_by_id(
        &self,
        id: i32,
    ) -> Result<Option<entity::service_offering::Model>, DbErr> {
        entity::prelude::ServiceOffering::find_by_id(id)
            .one(self.db)
            .await
    }

    pub async fn create(
        &self,
        params: CreateServiceOfferingParams,
    ) -> Result<entity::service_offering::Model, DbErr> {
        let now = Utc::now();
        entity::service_offering::ActiveModel {
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            category: ActiveValue::Set(params.category),
            price: ActiveValue::Set(params.price),
            duration_minutes: ActiveValue::Set(params.duration_minutes),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Applies the provided fields; returns `None` when the service does not exist.
    pub async fn update(
        &self,
        id: i32,
        params: UpdateServiceOfferingParams,
    ) -> Result<Option<entity::service_offering::Model>, DbErr> {
        let Some(service) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active_model: entity::service_offering::ActiveModel = service.into();
        if let Some(name) = params.name {
            active_model.name = ActiveValue::Set(name);
        }
        if let Some(description) = params.description {
            active_model.description = ActiveValue::Set(description);
        }
        if let Some(category) = params.category {
            active_model.category = ActiveValue::Set(category);
        }
        if let Some(price) = params.price {
            active_model.price = ActiveValue::Set(price);
        }
        if let Some(duration_minutes) = params.duration_minutes {
            active_model.duration_minutes = ActiveValue::Set(duration_minutes);
        }
        if let Some(is_active) = params.is_active {
            active_model.is_active = ActiveValue::Set(is_active);
        }
        active_model.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(active_model.update(self.db).await?))
    }

    /// Soft-deletes a service. Existing bookings keep referencing it.
    pub async fn deactivate(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::ServiceOffering::update_many()
            .col_expr(
                entity::service_offering::Column::IsActive,
                sea_orm::sea_query::Expr::value(false),
            )
            .col_expr(
                entity::service_offering::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .filter(entity::service_offering::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
