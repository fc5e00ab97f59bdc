use chrono::Utc;
use sea_orm::TransactionTrait;
use std::collections::{BTreeMap, HashMap};

use crate::server::{
    data::{
        booking::{BookingRepository, NewBooking, NewBookingItem},
        inventory::InventoryRepository,
        service_offering::ServiceOfferingRepository,
    },
    error::AppError,
    model::{
        booking::{Booking, CreateBookingParams, InventoryStatus},
        inventory::{InventoryItem, StockRequest},
        notification::{CreateNotificationParams, NotificationKind},
    },
    service::{booking::BookingService, notification::NotificationService},
};

impl<'a> BookingService<'a> {
    /// Creates a booking and reserves its selected inventory.
    ///
    /// The booking insert and every stock decrement share one transaction: if any item
    /// is missing, inactive or short of stock, nothing is written. Admins are notified of
    /// the new booking and of items that dropped to their reorder level.
    ///
    /// # Returns
    /// - `Ok(Booking)` - Created booking in `pending` status
    /// - `Err(AppError::BadRequest)` - Invalid input, inactive item or insufficient stock
    /// - `Err(AppError::NotFound)` - Unknown or inactive service, or unknown item
    pub async fn create(&self, params: CreateBookingParams) -> Result<Booking, AppError> {
        let address = params.address.trim().to_string();
        if address.is_empty() {
            return Err(AppError::BadRequest("Address is required".to_string()));
        }
        if params.scheduled_date < Utc::now().date_naive() {
            return Err(AppError::BadRequest(
                "Scheduled date cannot be in the past".to_string(),
            ));
        }
        let requests = merge_stock_requests(&params.items)?;
        let item_ids: Vec<i32> = requests.iter().map(|r| r.item_id).collect();

        let txn = self.db.begin().await?;

        let service = ServiceOfferingRepository::new(&txn)
            .find_by_id(params.service_id)
            .await?
            .filter(|s| s.is_active)
            .ok_or_else(|| AppError::NotFound("Service not found".to_string()))?;

        let inventory_repo = InventoryRepository::new(&txn);
        let items: HashMap<i32, entity::inventory_item::Model> = if item_ids.is_empty() {
            HashMap::new()
        } else {
            inventory_repo
                .find_many(item_ids.clone())
                .await?
                .into_iter()
                .map(|i| (i.id, i))
                .collect()
        };

        let mut total_amount = service.price;
        let mut lines = Vec::with_capacity(requests.len());
        for request in &requests {
            let item = items.get(&request.item_id).ok_or_else(|| {
                AppError::NotFound(format!("Inventory item {} not found", request.item_id))
            })?;
            if !item.is_active {
                return Err(AppError::BadRequest(format!(
                    "{} is no longer available",
                    item.name
                )));
            }
            if !inventory_repo.reserve(item.id, request.quantity).await? {
                return Err(AppError::BadRequest(format!(
                    "Insufficient stock for {}: {} available, {} requested",
                    item.name, item.quantity, request.quantity
                )));
            }

            total_amount += item.unit_price * request.quantity as f64;
            lines.push(NewBookingItem {
                item_id: item.id,
                quantity: request.quantity,
                unit_price: item.unit_price,
            });
        }

        let inventory_status = if lines.is_empty() {
            InventoryStatus::None
        } else {
            InventoryStatus::Reserved
        };

        let booking = BookingRepository::new(&txn)
            .create(NewBooking {
                house_owner_id: params.house_owner_id,
                service_id: service.id,
                scheduled_date: params.scheduled_date,
                scheduled_time: params.scheduled_time,
                address,
                notes: params.notes.filter(|n| !n.trim().is_empty()),
                total_amount: round_currency(total_amount),
                inventory_status,
                items: lines,
            })
            .await?;

        let low_stock: Vec<InventoryItem> = if item_ids.is_empty() {
            Vec::new()
        } else {
            inventory_repo
                .find_many(item_ids)
                .await?
                .into_iter()
                .map(InventoryItem::from_entity)
                .filter(InventoryItem::is_low_stock)
                .collect()
        };

        txn.commit().await?;

        tracing::info!(
            booking_id = booking.id,
            house_owner_id = booking.house_owner_id,
            items = requests.len(),
            "Booking created"
        );

        let booking = self.get_by_id(booking.id).await?;

        let notifications = NotificationService::new(self.db, self.realtime);
        notifications
            .notify_admins(
                CreateNotificationParams::new(
                    0,
                    NotificationKind::BookingCreated,
                    "New booking",
                    format!(
                        "{} booked {} for {} at {}.",
                        booking.house_owner_name,
                        booking.service_name,
                        booking.scheduled_date,
                        booking.scheduled_time.format("%H:%M")
                    ),
                )
                .for_booking(booking.id),
            )
            .await;
        for item in low_stock {
            notifications
                .notify_admins(CreateNotificationParams::new(
                    0,
                    NotificationKind::LowStock,
                    "Low stock",
                    format!(
                        "{} is down to {} {} (reorder level {}).",
                        item.name, item.quantity, item.unit, item.reorder_level
                    ),
                ))
                .await;
        }

        Ok(booking)
    }
}

/// Combines repeated items into one request per item, ordered by item id.
///
/// # Returns
/// - `Ok(Vec<StockRequest>)` - One request per distinct item
/// - `Err(AppError::BadRequest)` - A quantity is not positive or the sum overflows
pub fn merge_stock_requests(requests: &[StockRequest]) -> Result<Vec<StockRequest>, AppError> {
    let mut merged: BTreeMap<i32, i32> = BTreeMap::new();

    for request in requests {
        if request.quantity <= 0 {
            return Err(AppError::BadRequest(
                "Inventory quantities must be positive".to_string(),
            ));
        }
        let entry = merged.entry(request.item_id).or_insert(0);
        *entry = entry
            .checked_add(request.quantity)
            .ok_or_else(|| AppError::BadRequest("Inventory quantity too large".to_string()))?;
    }

    Ok(merged
        .into_iter()
        .map(|(item_id, quantity)| StockRequest { item_id, quantity })
        .collect())
}

fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
