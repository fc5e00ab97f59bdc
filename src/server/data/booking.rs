//! Booking repository.
//!
//! Bookings are returned together with their house owner, technician, service and line
//! items as [`BookingWithRelations`]. Related rows for a page of bookings are fetched
//! with one query per table and joined in memory.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::HashMap;

use crate::server::model::booking::{
    BookingScope, BookingStats, BookingStatus, BookingWithRelations, InventoryStatus,
    PaymentStatus, StatusChange,
};

/// Line item to insert with a new booking.
#[derive(Debug, Clone)]
pub struct NewBookingItem {
    pub item_id: i32,
    pub quantity: i32,
    pub unit_price: f64,
}

/// Row values for a new booking.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub house_owner_id: i32,
    pub service_id: i32,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub address: String,
    pub notes: Option<String>,
    pub total_amount: f64,
    pub inventory_status: InventoryStatus,
    pub items: Vec<NewBookingItem>,
}

pub struct BookingRepository<'a, C = DatabaseConnection> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> BookingRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a pending booking and its line items.
    ///
    /// Does not touch inventory; callers reserve stock in the same transaction.
    pub async fn create(&self, booking: NewBooking) -> Result<entity::booking::Model, DbErr> {
        let now = Utc::now();
        let model = entity::booking::ActiveModel {
            house_owner_id: ActiveValue::Set(booking.house_owner_id),
            service_id: ActiveValue::Set(booking.service_id),
            technician_id: ActiveValue::Set(None),
            scheduled_date: ActiveValue::Set(booking.scheduled_date),
            scheduled_time: ActiveValue::Set(booking.scheduled_time),
            address: ActiveValue::Set(booking.address),
            notes: ActiveValue::Set(booking.notes),
            status: ActiveValue::Set(BookingStatus::Pending.as_str().to_string()),
            inventory_status: ActiveValue::Set(booking.inventory_status.as_str().to_string()),
            total_amount: ActiveValue::Set(booking.total_amount),
            payment_status: ActiveValue::Set(PaymentStatus::Pending.as_str().to_string()),
            payment_intent_id: ActiveValue::Set(None),
            paid_at: ActiveValue::Set(None),
            cancellation_reason: ActiveValue::Set(None),
            reminder_sent: ActiveValue::Set(false),
            accepted_at: ActiveValue::Set(None),
            started_at: ActiveValue::Set(None),
            completed_at: ActiveValue::Set(None),
            rejected_at: ActiveValue::Set(None),
            cancelled_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        for item in booking.items {
            entity::booking_item::ActiveModel {
                booking_id: ActiveValue::Set(model.id),
                inventory_item_id: ActiveValue::Set(item.item_id),
                quantity: ActiveValue::Set(item.quantity),
                unit_price: ActiveValue::Set(item.unit_price),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }

        Ok(model)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::booking::Model>, DbErr> {
        entity::prelude::Booking::find_by_id(id).one(self.db).await
    }

    /// Gets a booking with its related rows.
    pub async fn get_by_id(&self, id: i32) -> Result<Option<BookingWithRelations>, DbErr> {
        let Some(booking) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        Ok(self.load_relations(vec![booking]).await?.pop())
    }

    pub async fn get_items(&self, booking_id: i32) -> Result<Vec<entity::booking_item::Model>, DbErr> {
        entity::prelude::BookingItem::find()
            .filter(entity::booking_item::Column::BookingId.eq(booking_id))
            .order_by_asc(entity::booking_item::Column::Id)
            .all(self.db)
            .await
    }

    /// Gets bookings visible in `scope`, newest first, optionally filtered by status.
    ///
    /// # Returns
    /// - `Ok((bookings, total))` - The requested page with relations and total matching count
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_paginated(
        &self,
        scope: BookingScope,
        status: Option<BookingStatus>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<BookingWithRelations>, u64), DbErr> {
        let mut query = entity::prelude::Booking::find();
        query = match scope {
            BookingScope::All => query,
            BookingScope::HouseOwner(id) => {
                query.filter(entity::booking::Column::HouseOwnerId.eq(id))
            }
            BookingScope::Technician(id) => {
                query.filter(entity::booking::Column::TechnicianId.eq(id))
            }
        };
        if let Some(status) = status {
            query = query.filter(entity::booking::Column::Status.eq(status.as_str()));
        }

        let paginator = query
            .order_by_desc(entity::booking::Column::CreatedAt)
            .order_by_desc(entity::booking::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let bookings = paginator.fetch_page(page).await?;

        Ok((self.load_relations(bookings).await?, total))
    }

    /// Assigns a technician, leaving status untouched.
    pub async fn assign_technician(&self, id: i32, technician_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Booking::update_many()
            .col_expr(
                entity::booking::Column::TechnicianId,
                Expr::value(Some(technician_id)),
            )
            .col_expr(entity::booking::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::booking::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Writes a status transition if the booking is still in `from`.
    ///
    /// The status check is part of the `UPDATE`, so two concurrent transitions from the
    /// same state cannot both succeed.
    ///
    /// # Returns
    /// - `Ok(true)` - Transition written
    /// - `Ok(false)` - Booking missing or no longer in `from`
    pub async fn apply_status_change(
        &self,
        id: i32,
        from: BookingStatus,
        change: StatusChange,
    ) -> Result<bool, DbErr> {
        let timestamp_column = match change.status {
            BookingStatus::Accepted => Some(entity::booking::Column::AcceptedAt),
            BookingStatus::InProgress => Some(entity::booking::Column::StartedAt),
            BookingStatus::Completed => Some(entity::booking::Column::CompletedAt),
            BookingStatus::Rejected => Some(entity::booking::Column::RejectedAt),
            BookingStatus::Cancelled => Some(entity::booking::Column::CancelledAt),
            BookingStatus::Pending => None,
        };

        let mut update = entity::prelude::Booking::update_many()
            .col_expr(
                entity::booking::Column::Status,
                Expr::value(change.status.as_str()),
            )
            .col_expr(entity::booking::Column::UpdatedAt, Expr::value(change.at));

        if let Some(column) = timestamp_column {
            update = update.col_expr(column, Expr::value(Some(change.at)));
        }
        if let Some(reason) = change.cancellation_reason {
            update = update.col_expr(
                entity::booking::Column::CancellationReason,
                Expr::value(Some(reason)),
            );
        }
        if let Some(inventory_status) = change.inventory_status {
            update = update.col_expr(
                entity::booking::Column::InventoryStatus,
                Expr::value(inventory_status.as_str()),
            );
        }

        let result = update
            .filter(entity::booking::Column::Id.eq(id))
            .filter(entity::booking::Column::Status.eq(from.as_str()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Counts bookings per status and sums the amount of paid bookings.
    pub async fn stats(&self) -> Result<BookingStats, DbErr> {
        let mut stats = BookingStats::default();

        for status in BookingStatus::ALL {
            let count = entity::prelude::Booking::find()
                .filter(entity::booking::Column::Status.eq(status.as_str()))
                .count(self.db)
                .await?;

            match status {
                BookingStatus::Pending => stats.pending = count,
                BookingStatus::Accepted => stats.accepted = count,
                BookingStatus::InProgress => stats.in_progress = count,
                BookingStatus::Completed => stats.completed = count,
                BookingStatus::Rejected => stats.rejected = count,
                BookingStatus::Cancelled => stats.cancelled = count,
            }
            stats.total += count;
        }

        let paid_amounts: Vec<f64> = entity::prelude::Booking::find()
            .select_only()
            .column(entity::booking::Column::TotalAmount)
            .filter(entity::booking::Column::PaymentStatus.eq(PaymentStatus::Paid.as_str()))
            .into_tuple()
            .all(self.db)
            .await?;
        stats.revenue = paid_amounts.iter().sum();

        Ok(stats)
    }

    /// Accepted bookings not yet reminded whose scheduled date falls within `[from, to]`.
    ///
    /// Date-level filtering only; callers compare the exact scheduled time.
    pub async fn get_reminder_candidates(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<entity::booking::Model>, DbErr> {
        entity::prelude::Booking::find()
            .filter(entity::booking::Column::Status.eq(BookingStatus::Accepted.as_str()))
            .filter(entity::booking::Column::ReminderSent.eq(false))
            .filter(entity::booking::Column::ScheduledDate.gte(from))
            .filter(entity::booking::Column::ScheduledDate.lte(to))
            .all(self.db)
            .await
    }

    pub async fn mark_reminder_sent(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::Booking::update_many()
            .col_expr(entity::booking::Column::ReminderSent, Expr::value(true))
            .filter(entity::booking::Column::Id.eq(id))
            .exec(self.db)
            .await?;
        Ok(())
    }

    pub async fn find_by_payment_intent(
        &self,
        payment_intent_id: &str,
    ) -> Result<Option<entity::booking::Model>, DbErr> {
        entity::prelude::Booking::find()
            .filter(entity::booking::Column::PaymentIntentId.eq(payment_intent_id))
            .one(self.db)
            .await
    }

    pub async fn set_payment_intent(&self, id: i32, payment_intent_id: &str) -> Result<(), DbErr> {
        entity::prelude::Booking::update_many()
            .col_expr(
                entity::booking::Column::PaymentIntentId,
                Expr::value(Some(payment_intent_id.to_string())),
            )
            .col_expr(entity::booking::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::booking::Column::Id.eq(id))
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Marks a booking paid unless it already is.
    ///
    /// # Returns
    /// - `Ok(true)` - Booking moved to paid by this call
    /// - `Ok(false)` - Already paid or missing
    pub async fn mark_paid(&self, id: i32, paid_at: DateTime<Utc>) -> Result<bool, DbErr> {
        let result = entity::prelude::Booking::update_many()
            .col_expr(
                entity::booking::Column::PaymentStatus,
                Expr::value(PaymentStatus::Paid.as_str()),
            )
            .col_expr(entity::booking::Column::PaidAt, Expr::value(Some(paid_at)))
            .col_expr(entity::booking::Column::UpdatedAt, Expr::value(paid_at))
            .filter(entity::booking::Column::Id.eq(id))
            .filter(entity::booking::Column::PaymentStatus.ne(PaymentStatus::Paid.as_str()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Records a failed payment attempt. Paid bookings are left as they are.
    pub async fn mark_payment_failed(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::Booking::update_many()
            .col_expr(
                entity::booking::Column::PaymentStatus,
                Expr::value(PaymentStatus::Failed.as_str()),
            )
            .col_expr(entity::booking::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::booking::Column::Id.eq(id))
            .filter(entity::booking::Column::PaymentStatus.ne(PaymentStatus::Paid.as_str()))
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Fetches the users, services and line items for a set of bookings.
    async fn load_relations(
        &self,
        bookings: Vec<entity::booking::Model>,
    ) -> Result<Vec<BookingWithRelations>, DbErr> {
        if bookings.is_empty() {
            return Ok(Vec::new());
        }

        let booking_ids: Vec<i32> = bookings.iter().map(|b| b.id).collect();
        let mut user_ids: Vec<i32> = bookings.iter().map(|b| b.house_owner_id).collect();
        user_ids.extend(bookings.iter().filter_map(|b| b.technician_id));
        let service_ids: Vec<i32> = bookings.iter().map(|b| b.service_id).collect();

        let users: HashMap<i32, entity::user::Model> = entity::prelude::User::find()
            .filter(entity::user::Column::Id.is_in(user_ids))
            .all(self.db)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let services: HashMap<i32, entity::service_offering::Model> =
            entity::prelude::ServiceOffering::find()
                .filter(entity::service_offering::Column::Id.is_in(service_ids))
                .all(self.db)
                .await?
                .into_iter()
                .map(|s| (s.id, s))
                .collect();

        let lines = entity::prelude::BookingItem::find()
            .filter(entity::booking_item::Column::BookingId.is_in(booking_ids))
            .order_by_asc(entity::booking_item::Column::Id)
            .all(self.db)
            .await?;

        let item_ids: Vec<i32> = lines.iter().map(|l| l.inventory_item_id).collect();
        let items: HashMap<i32, entity::inventory_item::Model> = if item_ids.is_empty() {
            HashMap::new()
        } else {
            entity::prelude::InventoryItem::find()
                .filter(entity::inventory_item::Column::Id.is_in(item_ids))
                .all(self.db)
                .await?
                .into_iter()
                .map(|i| (i.id, i))
                .collect()
        };

        let mut lines_by_booking: HashMap<
            i32,
            Vec<(
                entity::booking_item::Model,
                Option<entity::inventory_item::Model>,
            )>,
        > = HashMap::new();
        for line in lines {
            let item = items.get(&line.inventory_item_id).cloned();
            lines_by_booking
                .entry(line.booking_id)
                .or_default()
                .push((line, item));
        }

        Ok(bookings
            .into_iter()
            .map(|booking| BookingWithRelations {
                house_owner: users.get(&booking.house_owner_id).cloned(),
                technician: booking.technician_id.and_then(|id| users.get(&id).cloned()),
                service: services.get(&booking.service_id).cloned(),
                items: lines_by_booking.remove(&booking.id).unwrap_or_default(),
                booking,
            })
            .collect())
    }
}
