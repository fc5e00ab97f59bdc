use crate::server::{
    data::{booking::BookingRepository, user::UserRepository},
    error::AppError,
    model::{
        booking::{Booking, BookingStatus},
        notification::{CreateNotificationParams, NotificationKind},
        parse_stored,
        user::Role,
    },
    service::{
        booking::{booking_not_found, BookingService},
        notification::NotificationService,
    },
};

impl<'a> BookingService<'a> {
    /// Assigns or reassigns a technician to a pending or accepted booking.
    ///
    /// The booking status is left unchanged. The technician and the house owner are
    /// notified.
    ///
    /// # Returns
    /// - `Ok(Booking)` - Booking with the technician assigned
    /// - `Err(AppError::NotFound)` - Booking or user not found
    /// - `Err(AppError::BadRequest)` - Booking past acceptance, or user is not an active technician
    pub async fn assign_technician(
        &self,
        booking_id: i32,
        technician_id: i32,
    ) -> Result<Booking, AppError> {
        let (booking, status) = self.load_row(booking_id).await?;
        if !matches!(status, BookingStatus::Pending | BookingStatus::Accepted) {
            return Err(AppError::BadRequest(format!(
                "Cannot assign a technician to a {} booking",
                status
            )));
        }

        let technician = UserRepository::new(self.db)
            .find_by_id(technician_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Technician not found".to_string()))?;
        let role: Role = parse_stored("role", &technician.role)?;
        if role != Role::Technician || !technician.is_active {
            return Err(AppError::BadRequest(
                "User is not an active technician".to_string(),
            ));
        }

        if !BookingRepository::new(self.db)
            .assign_technician(booking.id, technician.id)
            .await?
        {
            return Err(booking_not_found());
        }

        tracing::info!(booking_id, technician_id, "Technician assigned to booking");

        let booking = self.get_by_id(booking_id).await?;

        let notifications = NotificationService::new(self.db, self.realtime);
        notifications
            .notify(
                CreateNotificationParams::new(
                    technician.id,
                    NotificationKind::BookingAssigned,
                    "New job assigned",
                    format!(
                        "You have been assigned to {} on {} at {}, {}.",
                        booking.service_name,
                        booking.scheduled_date,
                        booking.scheduled_time.format("%H:%M"),
                        booking.address
                    ),
                )
                .for_booking(booking.id),
            )
            .await;
        notifications
            .notify(
                CreateNotificationParams::new(
                    booking.house_owner_id,
                    NotificationKind::BookingStatusChanged,
                    "Technician assigned",
                    format!(
                        "{} will handle your {} booking.",
                        technician.name, booking.service_name
                    ),
                )
                .for_booking(booking.id),
            )
            .await;

        Ok(booking)
    }
}
