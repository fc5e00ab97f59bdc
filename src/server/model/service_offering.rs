use chrono::{DateTime, Utc};

use crate::model::service_offering::{
    CreateServiceOfferingDto, ServiceOfferingDto, UpdateServiceOfferingDto,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceOffering {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub duration_minutes: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl ServiceOffering {
    pub fn from_entity(entity: entity::service_offering::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            category: entity.category,
            price: entity.price,
            duration_minutes: entity.duration_minutes,
            is_active: entity.is_active,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> ServiceOfferingDto {
        ServiceOfferingDto {
            id: self.id,
            name: self.name,
            description: self.description,
            category: self.category,
            price: self.price,
            duration_minutes: self.duration_minutes,
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateServiceOfferingParams {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub duration_minutes: i32,
}

impl CreateServiceOfferingParams {
    pub fn from_dto(dto: CreateServiceOfferingDto) -> Self {
        Self {
            name: dto.name.trim().to_string(),
            description: dto.description,
            category: dto.category.trim().to_lowercase(),
            price: dto.price,
            duration_minutes: dto.duration_minutes,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateServiceOfferingParams {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub duration_minutes: Option<i32>,
    pub is_active: Option<bool>,
}

impl UpdateServiceOfferingParams {
    pub fn from_dto(dto: UpdateServiceOfferingDto) -> Self {
        Self {
            name: dto.name.map(|n| n.trim().to_string()),
            description: dto.description,
            category: dto.category.map(|c| c.trim().to_lowercase()),
            price: dto.price,
            duration_minutes: dto.duration_minutes,
            is_active: dto.is_active,
        }
    }
}
