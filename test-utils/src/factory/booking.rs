//! Booking factory for creating bookings directly, bypassing reservation logic.

use chrono::{Duration, NaiveTime, Timelike, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test bookings.
///
/// Rows are inserted as-is: no inventory is reserved and no notifications are written.
/// Use the booking service when a test needs the full lifecycle side effects.
pub struct BookingFactory<'a> {
    db: &'a DatabaseConnection,
    house_owner_id: i32,
    service_id: i32,
    technician_id: Option<i32>,
    status: String,
    inventory_status: String,
    scheduled_in: Duration,
    total_amount: f64,
}

impl<'a> BookingFactory<'a> {
    /// Creates a new factory with defaults: status `"pending"`, no technician,
    /// no reservation, scheduled three days from now, total `100.0`.
    pub fn new(db: &'a DatabaseConnection, house_owner_id: i32, service_id: i32) -> Self {
        Self {
            db,
            house_owner_id,
            service_id,
            technician_id: None,
            status: "pending".to_string(),
            inventory_status: "none".to_string(),
            scheduled_in: Duration::days(3),
            total_amount: 100.0,
        }
    }

    pub fn technician(mut self, technician_id: i32) -> Self {
        self.technician_id = Some(technician_id);
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn inventory_status(mut self, inventory_status: impl Into<String>) -> Self {
        self.inventory_status = inventory_status.into();
        self
    }

    /// Sets how far from now the booking is scheduled.
    pub fn scheduled_in(mut self, offset: Duration) -> Self {
        self.scheduled_in = offset;
        self
    }

    pub fn total_amount(mut self, total_amount: f64) -> Self {
        self.total_amount = total_amount;
        self
    }

    /// Builds and inserts the booking into the database.
    pub async fn build(self) -> Result<entity::booking::Model, DbErr> {
        let now = Utc::now();
        let scheduled = now + self.scheduled_in;
        let scheduled_time =
            NaiveTime::from_hms_opt(scheduled.hour(), scheduled.minute(), 0).unwrap_or_default();

        entity::booking::ActiveModel {
            house_owner_id: ActiveValue::Set(self.house_owner_id),
            service_id: ActiveValue::Set(self.service_id),
            technician_id: ActiveValue::Set(self.technician_id),
            scheduled_date: ActiveValue::Set(scheduled.date_naive()),
            scheduled_time: ActiveValue::Set(scheduled_time),
            address: ActiveValue::Set("1 Test Street".to_string()),
            notes: ActiveValue::Set(None),
            status: ActiveValue::Set(self.status),
            inventory_status: ActiveValue::Set(self.inventory_status),
            total_amount: ActiveValue::Set(self.total_amount),
            payment_status: ActiveValue::Set("pending".to_string()),
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
        .await
    }
}

/// Creates a pending booking with default values.
pub async fn create_booking(
    db: &DatabaseConnection,
    house_owner_id: i32,
    service_id: i32,
) -> Result<entity::booking::Model, DbErr> {
    BookingFactory::new(db, house_owner_id, service_id).build().await
}
