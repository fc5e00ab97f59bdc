use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryRatingsDto {
    pub quality: Option<i32>,
    pub punctuality: Option<i32>,
    pub professionalism: Option<i32>,
    pub value: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AdminResponseDto {
    pub message: String,
    pub responded_by: Option<i32>,
    pub responded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeedbackDto {
    pub id: i32,
    pub booking_id: i32,
    pub house_owner_id: i32,
    pub technician_id: Option<i32>,
    pub service_id: i32,
    pub rating: i32,
    pub categories: CategoryRatingsDto,
    pub comment: Option<String>,
    pub is_auto_generated: bool,
    pub status: String,
    pub admin_response: Option<AdminResponseDto>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaginatedFeedbackDto {
    pub feedback: Vec<FeedbackDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateFeedbackDto {
    pub booking_id: i32,
    pub rating: i32,
    pub categories: Option<CategoryRatingsDto>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RespondFeedbackDto {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateFeedbackStatusDto {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RatingSummaryDto {
    pub technician_id: i32,
    pub average_rating: f64,
    pub total_reviews: u64,
    pub quality: Option<f64>,
    pub punctuality: Option<f64>,
    pub professionalism: Option<f64>,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TechnicianFeedbackDto {
    pub summary: RatingSummaryDto,
    pub feedback: Vec<FeedbackDto>,
}
