use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SelectedInventoryDto {
    pub item_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookingItemDto {
    pub item_id: i32,
    pub item_name: String,
    pub quantity: i32,
    pub unit_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookingDto {
    pub id: i32,
    pub house_owner_id: i32,
    pub house_owner_name: String,
    pub service_id: i32,
    pub service_name: String,
    pub technician_id: Option<i32>,
    pub technician_name: Option<String>,
    pub scheduled_date: NaiveDate,
    /// `HH:MM`, 24-hour clock.
    pub scheduled_time: String,
    pub address: String,
    pub notes: Option<String>,
    pub status: String,
    pub inventory_status: String,
    pub selected_inventory: Vec<BookingItemDto>,
    pub total_amount: f64,
    pub payment_status: String,
    pub paid_at: Option<DateTime<Utc>>,
    pub cancellation_reason: Option<String>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaginatedBookingsDto {
    pub bookings: Vec<BookingDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateBookingDto {
    pub service_id: i32,
    pub scheduled_date: NaiveDate,
    /// `HH:MM`, 24-hour clock.
    pub scheduled_time: String,
    pub address: String,
    pub notes: Option<String>,
    #[serde(default)]
    pub selected_inventory: Vec<SelectedInventoryDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssignTechnicianDto {
    pub technician_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateBookingStatusDto {
    pub status: String,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CancelBookingDto {
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookingStatsDto {
    pub total: u64,
    pub pending: u64,
    pub accepted: u64,
    pub in_progress: u64,
    pub completed: u64,
    pub rejected: u64,
    pub cancelled: u64,
    /// Sum of `total_amount` over paid bookings.
    pub revenue: f64,
}
