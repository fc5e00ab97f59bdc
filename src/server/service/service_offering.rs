use sea_orm::DatabaseConnection;

use crate::server::{
    data::service_offering::ServiceOfferingRepository,
    error::AppError,
    model::service_offering::{
        CreateServiceOfferingParams, ServiceOffering, UpdateServiceOfferingParams,
    },
};

pub struct ServiceOfferingService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ServiceOfferingService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists catalogue entries, optionally by category. Inactive entries are admin only.
    pub async fn get_all(
        &self,
        category: Option<String>,
        include_inactive: bool,
    ) -> Result<Vec<ServiceOffering>, AppError> {
        let category = category
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty());

        let services = ServiceOfferingRepository::new(self.db)
            .get_all(category.as_deref(), include_inactive)
            .await?;

        Ok(services
            .into_iter()
            .map(ServiceOffering::from_entity)
            .collect())
    }

    pub async fn get_categories(&self) -> Result<Vec<String>, AppError> {
        Ok(ServiceOfferingRepository::new(self.db)
            .get_categories()
            .await?)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<ServiceOffering, AppError> {
        ServiceOfferingRepository::new(self.db)
            .find_by_id(id)
            .await?
            .map(ServiceOffering::from_entity)
            .ok_or_else(|| AppError::NotFound("Service not found".to_string()))
    }

    pub async fn create(
        &self,
        params: CreateServiceOfferingParams,
    ) -> Result<ServiceOffering, AppError> {
        validate_fields(
            Some(&params.name),
            Some(&params.category),
            Some(params.price),
            Some(params.duration_minutes),
        )?;

        let service = ServiceOfferingRepository::new(self.db)
            .create(params)
            .await?;

        tracing::info!(service_id = service.id, "Service created");

        Ok(ServiceOffering::from_entity(service))
    }

    pub async fn update(
        &self,
        id: i32,
        params: UpdateServiceOfferingParams,
    ) -> Result<ServiceOffering, AppError> {
        validate_fields(
            params.name.as_ref(),
            params.category.as_ref(),
            params.price,
            params.duration_minutes,
        )?;

        ServiceOfferingRepository::new(self.db)
            .update(id, params)
            .await?
            .map(ServiceOffering::from_entity)
            .ok_or_else(|| AppError::NotFound("Service not found".to_string()))
    }

    /// Hides the service from the catalogue. Existing bookings keep referencing it.
    pub async fn deactivate(&self, id: i32) -> Result<(), AppError> {
        if !ServiceOfferingRepository::new(self.db).deactivate(id).await? {
            return Err(AppError::NotFound("Service not found".to_string()));
        }
        Ok(())
    }
}

fn validate_fields(
    name: Option<&String>,
    category: Option<&String>,
    price: Option<f64>,
    duration_minutes: Option<i32>,
) -> Result<(), AppError> {
    if name.is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::BadRequest("Service name is required".to_string()));
    }
    if category.is_some_and(|c| c.trim().is_empty()) {
        return Err(AppError::BadRequest("Service category is required".to_string()));
    }
    if price.is_some_and(|p| !p.is_finite() || p < 0.0) {
        return Err(AppError::BadRequest("Price cannot be negative".to_string()));
    }
    if duration_minutes.is_some_and(|d| d <= 0) {
        return Err(AppError::BadRequest(
            "Duration must be a positive number of minutes".to_string(),
        ));
    }
    Ok(())
}
