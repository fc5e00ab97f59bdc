use chrono::Utc;
use sea_orm::TransactionTrait;

use crate::server::{
    data::{
        booking::BookingRepository, feedback::FeedbackRepository, inventory::InventoryRepository,
    },
    error::{auth::AuthError, AppError},
    model::{
        booking::{Booking, BookingStatus, InventoryStatus, StatusChange},
        feedback::{CategoryRatings, CreateFeedbackParams, FeedbackStatus, MAX_RATING},
        notification::{CreateNotificationParams, NotificationKind},
        parse_stored,
        user::User,
    },
    service::{
        booking::{concurrent_change, BookingService},
        notification::NotificationService,
    },
};

impl<'a> BookingService<'a> {
    /// Moves a booking to a new status on behalf of `actor`.
    ///
    /// Only admins accept or reject; accepting requires an assigned technician. Admins
    /// and the assigned technician start and complete work. Cancellation is delegated
    /// to [`BookingService::cancel`]. Rejection releases reserved inventory and completion
    /// consumes it.
    ///
    /// # Returns
    /// - `Ok(Booking)` - Booking in its new status
    /// - `Err(AppError::BadRequest)` - Transition not allowed from the current status
    /// - `Err(AppError::AuthErr)` - Actor may not perform this transition
    /// - `Err(AppError::Conflict)` - Booking changed concurrently
    pub async fn update_status(
        &self,
        actor: &User,
        booking_id: i32,
        target: BookingStatus,
        reason: Option<String>,
    ) -> Result<Booking, AppError> {
        if target == BookingStatus::Cancelled {
            return self.cancel(actor, booking_id, reason).await;
        }

        let (booking, current) = self.load_row(booking_id).await?;
        if !current.can_transition_to(target) {
            return Err(AppError::BadRequest(format!(
                "Cannot change booking status from {} to {}",
                current, target
            )));
        }

        match target {
            BookingStatus::Accepted => {
                require_admin(actor, booking_id, "accept")?;
                if booking.technician_id.is_none() {
                    return Err(AppError::BadRequest(
                        "Assign a technician before accepting the booking".to_string(),
                    ));
                }
            }
            BookingStatus::Rejected => require_admin(actor, booking_id, "reject")?,
            _ => {
                if !actor.is_admin() && booking.technician_id != Some(actor.id) {
                    return Err(AuthError::AccessDenied(
                        actor.id,
                        format!("User is not the technician assigned to booking {}", booking_id),
                    )
                    .into());
                }
            }
        }

        match target {
            BookingStatus::Completed => self.complete(&booking, current).await?,
            BookingStatus::Rejected => {
                self.close_and_release(&booking, current, target, clean_reason(reason))
                    .await?
            }
            _ => {
                let applied = BookingRepository::new(self.db)
                    .apply_status_change(
                        booking.id,
                        current,
                        StatusChange {
                            status: target,
                            at: Utc::now(),
                            cancellation_reason: None,
                            inventory_status: None,
                        },
                    )
                    .await?;
                if !applied {
                    return Err(concurrent_change());
                }
            }
        }

        tracing::info!(
            booking_id,
            actor_id = actor.id,
            from = current.as_str(),
            to = target.as_str(),
            "Booking status changed"
        );

        let booking = self.get_by_id(booking_id).await?;
        self.notify_status_change(&booking).await;

        Ok(booking)
    }

    /// Cancels a booking and releases its reserved inventory.
    ///
    /// Admins may cancel any booking that is not finished. House owners may cancel their
    /// own bookings while they are pending or accepted.
    ///
    /// # Returns
    /// - `Ok(Booking)` - Cancelled booking
    /// - `Err(AppError::BadRequest)` - Booking already finished, or too late for the owner
    /// - `Err(AppError::AuthErr)` - Actor is neither admin nor the owner
    /// - `Err(AppError::Conflict)` - Booking changed concurrently
    pub async fn cancel(
        &self,
        actor: &User,
        booking_id: i32,
        reason: Option<String>,
    ) -> Result<Booking, AppError> {
        let (booking, current) = self.load_row(booking_id).await?;

        if !actor.is_admin() && booking.house_owner_id != actor.id {
            return Err(AuthError::AccessDenied(
                actor.id,
                format!("User does not own booking {}", booking_id),
            )
            .into());
        }
        if current.is_terminal() {
            return Err(AppError::BadRequest(format!(
                "Cannot cancel a {} booking",
                current
            )));
        }
        if !actor.is_admin()
            && !matches!(current, BookingStatus::Pending | BookingStatus::Accepted)
        {
            return Err(AppError::BadRequest(
                "Bookings already in progress can only be cancelled by an admin".to_string(),
            ));
        }

        self.close_and_release(
            &booking,
            current,
            BookingStatus::Cancelled,
            clean_reason(reason),
        )
        .await?;

        tracing::info!(booking_id, actor_id = actor.id, "Booking cancelled");

        let booking = self.get_by_id(booking_id).await?;
        self.notify_status_change(&booking).await;

        Ok(booking)
    }

    /// Writes a closing status and returns reserved stock in the same transaction.
    async fn close_and_release(
        &self,
        booking: &entity::booking::Model,
        from: BookingStatus,
        status: BookingStatus,
        reason: Option<String>,
    ) -> Result<(), AppError> {
        let inventory_status: InventoryStatus =
            parse_stored("inventory status", &booking.inventory_status)?;
        let reserved = inventory_status == InventoryStatus::Reserved;

        let txn = self.db.begin().await?;
        let booking_repo = BookingRepository::new(&txn);

        let applied = booking_repo
            .apply_status_change(
                booking.id,
                from,
                StatusChange {
                    status,
                    at: Utc::now(),
                    cancellation_reason: reason,
                    inventory_status: reserved.then_some(InventoryStatus::Released),
                },
            )
            .await?;
        if !applied {
            return Err(concurrent_change());
        }

        if reserved {
            let inventory_repo = InventoryRepository::new(&txn);
            for line in booking_repo.get_items(booking.id).await? {
                let returned = inventory_repo
                    .add_stock(line.inventory_item_id, line.quantity)
                    .await?;
                if !returned {
                    tracing::warn!(
                        booking_id = booking.id,
                        item_id = line.inventory_item_id,
                        quantity = line.quantity,
                        "Reserved stock could not be returned"
                    );
                }
            }
        }

        txn.commit().await?;

        Ok(())
    }

    /// Completes a booking, consumes its reservation and records a full-marks feedback
    /// when the owner has not left any.
    async fn complete(
        &self,
        booking: &entity::booking::Model,
        from: BookingStatus,
    ) -> Result<(), AppError> {
        let inventory_status: InventoryStatus =
            parse_stored("inventory status", &booking.inventory_status)?;

        let txn = self.db.begin().await?;

        let applied = BookingRepository::new(&txn)
            .apply_status_change(
                booking.id,
                from,
                StatusChange {
                    status: BookingStatus::Completed,
                    at: Utc::now(),
                    cancellation_reason: None,
                    inventory_status: (inventory_status == InventoryStatus::Reserved)
                        .then_some(InventoryStatus::Consumed),
                },
            )
            .await?;
        if !applied {
            return Err(concurrent_change());
        }

        let feedback_repo = FeedbackRepository::new(&txn);
        if !feedback_repo.exists_for_booking(booking.id).await? {
            feedback_repo
                .create(CreateFeedbackParams {
                    booking_id: booking.id,
                    house_owner_id: booking.house_owner_id,
                    technician_id: booking.technician_id,
                    service_id: booking.service_id,
                    rating: MAX_RATING,
                    categories: CategoryRatings::max(),
                    comment: None,
                    is_auto_generated: true,
                    status: FeedbackStatus::Pending,
                })
                .await?;
        }

        txn.commit().await?;

        Ok(())
    }

    /// Tells the owner, and the technician where relevant, about the booking's new status.
    async fn notify_status_change(&self, booking: &Booking) {
        let service = &booking.service_name;
        let (kind, title, message) = match booking.status {
            BookingStatus::Accepted => (
                NotificationKind::BookingStatusChanged,
                "Booking accepted",
                format!(
                    "Your {} booking on {} at {} has been accepted.",
                    service,
                    booking.scheduled_date,
                    booking.scheduled_time.format("%H:%M")
                ),
            ),
            BookingStatus::InProgress => (
                NotificationKind::BookingStatusChanged,
                "Work started",
                format!("Work on your {} booking has started.", service),
            ),
            BookingStatus::Completed => (
                NotificationKind::BookingStatusChanged,
                "Booking completed",
                format!(
                    "Your {} booking is complete. Let us know how it went.",
                    service
                ),
            ),
            BookingStatus::Rejected => (
                NotificationKind::BookingStatusChanged,
                "Booking rejected",
                match &booking.cancellation_reason {
                    Some(reason) => format!("Your {} booking was rejected: {}", service, reason),
                    None => format!("Your {} booking was rejected.", service),
                },
            ),
            BookingStatus::Cancelled => (
                NotificationKind::BookingCancelled,
                "Booking cancelled",
                match &booking.cancellation_reason {
                    Some(reason) => format!("The {} booking was cancelled: {}", service, reason),
                    None => format!("The {} booking was cancelled.", service),
                },
            ),
            BookingStatus::Pending => return,
        };

        let notifications = NotificationService::new(self.db, self.realtime);
        notifications
            .notify(
                CreateNotificationParams::new(booking.house_owner_id, kind, title, message.clone())
                    .for_booking(booking.id),
            )
            .await;

        if matches!(
            booking.status,
            BookingStatus::Accepted | BookingStatus::Cancelled
        ) {
            if let Some(technician_id) = booking.technician_id {
                notifications
                    .notify(
                        CreateNotificationParams::new(technician_id, kind, title, message)
                            .for_booking(booking.id),
                    )
                    .await;
            }
        }
    }
}

fn require_admin(actor: &User, booking_id: i32, action: &str) -> Result<(), AppError> {
    if actor.is_admin() {
        return Ok(());
    }

    Err(AuthError::AccessDenied(
        actor.id,
        format!("Only admins may {} booking {}", action, booking_id),
    )
    .into())
}

fn clean_reason(reason: Option<String>) -> Option<String> {
    reason
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
}
