//! Booking domain models, lifecycle enums and parameters.
//!
//! The status transition table lives on [`BookingStatus::can_transition_to`]; who may
//! perform a given transition is decided by the booking service.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::{fmt, str::FromStr};

use crate::{
    model::booking::{
        BookingDto, BookingItemDto, BookingStatsDto, CreateBookingDto, PaginatedBookingsDto,
    },
    server::{
        error::AppError,
        model::{inventory::StockRequest, parse_stored, UnknownVariant},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingStatus {
    Pending,
    Accepted,
    InProgress,
    Completed,
    Rejected,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 6] = [
        BookingStatus::Pending,
        BookingStatus::Accepted,
        BookingStatus::InProgress,
        BookingStatus::Completed,
        BookingStatus::Rejected,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Accepted => "accepted",
            BookingStatus::InProgress => "in_progress",
            BookingStatus::Completed => "completed",
            BookingStatus::Rejected => "rejected",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BookingStatus::Completed | BookingStatus::Rejected | BookingStatus::Cancelled
        )
    }

    /// Whether the lifecycle permits moving from `self` to `next`.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;

        matches!(
            (self, next),
            (Pending, Accepted)
                | (Pending, Rejected)
                | (Pending, Cancelled)
                | (Accepted, InProgress)
                | (Accepted, Cancelled)
                | (InProgress, Completed)
                | (InProgress, Cancelled)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookingStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "booking status",
                value: s.to_string(),
            })
    }
}

/// Where a booking's inventory reservation stands.
///
/// Stock is decremented once on `None -> Reserved`, returned on `Reserved -> Released`
/// and left untouched on `Reserved -> Consumed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryStatus {
    None,
    Reserved,
    Released,
    Consumed,
}

impl InventoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InventoryStatus::None => "none",
            InventoryStatus::Reserved => "reserved",
            InventoryStatus::Released => "released",
            InventoryStatus::Consumed => "consumed",
        }
    }
}

impl FromStr for InventoryStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(InventoryStatus::None),
            "reserved" => Ok(InventoryStatus::Reserved),
            "released" => Ok(InventoryStatus::Released),
            "consumed" => Ok(InventoryStatus::Consumed),
            other => Err(UnknownVariant {
                kind: "inventory status",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "paid" => Ok(PaymentStatus::Paid),
            "failed" => Ok(PaymentStatus::Failed),
            other => Err(UnknownVariant {
                kind: "payment status",
                value: other.to_string(),
            }),
        }
    }
}

/// Selected inventory line with the unit price captured at booking time.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingItem {
    pub item_id: i32,
    pub item_name: String,
    pub quantity: i32,
    pub unit_price: f64,
}

impl BookingItem {
    pub fn into_dto(self) -> BookingItemDto {
        BookingItemDto {
            item_id: self.item_id,
            item_name: self.item_name,
            quantity: self.quantity,
            unit_price: self.unit_price,
        }
    }
}

/// Booking row joined with the rows needed to present it.
pub struct BookingWithRelations {
    pub booking: entity::booking::Model,
    pub house_owner: Option<entity::user::Model>,
    pub technician: Option<entity::user::Model>,
    pub service: Option<entity::service_offering::Model>,
    pub items: Vec<(
        entity::booking_item::Model,
        Option<entity::inventory_item::Model>,
    )>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: i32,
    pub house_owner_id: i32,
    pub house_owner_name: String,
    pub service_id: i32,
    pub service_name: String,
    pub technician_id: Option<i32>,
    pub technician_name: Option<String>,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub address: String,
    pub notes: Option<String>,
    pub status: BookingStatus,
    pub inventory_status: InventoryStatus,
    pub items: Vec<BookingItem>,
    pub total_amount: f64,
    pub payment_status: PaymentStatus,
    pub payment_intent_id: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub cancellation_reason: Option<String>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Converts a booking with its joined rows into a domain model.
    ///
    /// Missing related rows fall back to placeholder names rather than failing.
    ///
    /// # Returns
    /// - `Ok(Booking)` - Successfully converted domain model
    /// - `Err(AppError::InternalErr)` - A stored status string is not recognised
    pub fn from_with_relations(relations: BookingWithRelations) -> Result<Self, AppError> {
        let BookingWithRelations {
            booking,
            house_owner,
            technician,
            service,
            items,
        } = relations;

        let items = items
            .into_iter()
            .map(|(line, item)| BookingItem {
                item_id: line.inventory_item_id,
                item_name: item
                    .map(|i| i.name)
                    .unwrap_or_else(|| format!("Item {}", line.inventory_item_id)),
                quantity: line.quantity,
                unit_price: line.unit_price,
            })
            .collect();

        Ok(Self {
            id: booking.id,
            house_owner_id: booking.house_owner_id,
            house_owner_name: house_owner
                .map(|u| u.name)
                .unwrap_or_else(|| "Unknown".to_string()),
            service_id: booking.service_id,
            service_name: service
                .map(|s| s.name)
                .unwrap_or_else(|| "Unknown".to_string()),
            technician_id: booking.technician_id,
            technician_name: technician.map(|t| t.name),
            scheduled_date: booking.scheduled_date,
            scheduled_time: booking.scheduled_time,
            address: booking.address,
            notes: booking.notes,
            status: parse_stored("booking status", &booking.status)?,
            inventory_status: parse_stored("inventory status", &booking.inventory_status)?,
            items,
            total_amount: booking.total_amount,
            payment_status: parse_stored("payment status", &booking.payment_status)?,
            payment_intent_id: booking.payment_intent_id,
            paid_at: booking.paid_at,
            cancellation_reason: booking.cancellation_reason,
            accepted_at: booking.accepted_at,
            started_at: booking.started_at,
            completed_at: booking.completed_at,
            rejected_at: booking.rejected_at,
            cancelled_at: booking.cancelled_at,
            created_at: booking.created_at,
        })
    }

    /// Whether the user owns the booking or is assigned to it.
    pub fn is_participant(&self, user_id: i32) -> bool {
        self.house_owner_id == user_id || self.technician_id == Some(user_id)
    }

    pub fn into_dto(self) -> BookingDto {
        BookingDto {
            id: self.id,
            house_owner_id: self.house_owner_id,
            house_owner_name: self.house_owner_name,
            service_id: self.service_id,
            service_name: self.service_name,
            technician_id: self.technician_id,
            technician_name: self.technician_name,
            scheduled_date: self.scheduled_date,
            scheduled_time: self.scheduled_time.format("%H:%M").to_string(),
            address: self.address,
            notes: self.notes,
            status: self.status.as_str().to_string(),
            inventory_status: self.inventory_status.as_str().to_string(),
            selected_inventory: self.items.into_iter().map(BookingItem::into_dto).collect(),
            total_amount: self.total_amount,
            payment_status: self.payment_status.as_str().to_string(),
            paid_at: self.paid_at,
            cancellation_reason: self.cancellation_reason,
            accepted_at: self.accepted_at,
            started_at: self.started_at,
            completed_at: self.completed_at,
            cancelled_at: self.cancelled_at,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PaginatedBookings {
    pub bookings: Vec<Booking>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedBookings {
    pub fn into_dto(self) -> PaginatedBookingsDto {
        PaginatedBookingsDto {
            bookings: self.bookings.into_iter().map(Booking::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// Which bookings a listing may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingScope {
    All,
    HouseOwner(i32),
    Technician(i32),
}

#[derive(Debug, Clone)]
pub struct CreateBookingParams {
    pub house_owner_id: i32,
    pub service_id: i32,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub address: String,
    pub notes: Option<String>,
    pub items: Vec<StockRequest>,
}

impl CreateBookingParams {
    pub fn from_dto(dto: CreateBookingDto, house_owner_id: i32) -> Result<Self, AppError> {
        Ok(Self {
            house_owner_id,
            service_id: dto.service_id,
            scheduled_date: dto.scheduled_date,
            scheduled_time: parse_scheduled_time(dto.scheduled_time.trim())?,
            address: dto.address.trim().to_string(),
            notes: dto
                .notes
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            items: dto
                .selected_inventory
                .into_iter()
                .map(|s| StockRequest {
                    item_id: s.item_id,
                    quantity: s.quantity,
                })
                .collect(),
        })
    }
}

/// Columns written by a status transition.
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub status: BookingStatus,
    pub at: DateTime<Utc>,
    pub cancellation_reason: Option<String>,
    pub inventory_status: Option<InventoryStatus>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingStats {
    pub total: u64,
    pub pending: u64,
    pub accepted: u64,
    pub in_progress: u64,
    pub completed: u64,
    pub rejected: u64,
    pub cancelled: u64,
    pub revenue: f64,
}

impl BookingStats {
    pub fn into_dto(self) -> BookingStatsDto {
        BookingStatsDto {
            total: self.total,
            pending: self.pending,
            accepted: self.accepted,
            in_progress: self.in_progress,
            completed: self.completed,
            rejected: self.rejected,
            cancelled: self.cancelled,
            revenue: self.revenue,
        }
    }
}

/// Parses an `HH:MM` (or `HH:MM:SS`) clock time.
pub fn parse_scheduled_time(value: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| AppError::BadRequest(format!("Invalid time '{}', expected HH:MM", value)))
}
