use chrono::{DateTime, Duration, Utc};

use crate::server::{
    data::booking::BookingRepository,
    error::AppError,
    model::notification::{CreateNotificationParams, NotificationKind},
    service::{booking::BookingService, notification::NotificationService},
};

/// How far ahead of the scheduled time a reminder is sent.
pub const REMINDER_WINDOW_HOURS: i64 = 24;

impl<'a> BookingService<'a> {
    /// Reminds owners and technicians of accepted bookings starting within the next
    /// [`REMINDER_WINDOW_HOURS`] hours. Each booking is reminded once.
    ///
    /// Scheduled dates and times are interpreted as UTC.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of bookings reminded
    /// - `Err(AppError)` - Database error while loading candidates
    pub async fn send_due_reminders(&self, now: DateTime<Utc>) -> Result<usize, AppError> {
        let window_end = now + Duration::hours(REMINDER_WINDOW_HOURS);
        let repo = BookingRepository::new(self.db);

        let candidates = repo
            .get_reminder_candidates(now.date_naive(), window_end.date_naive())
            .await?;

        let notifications = NotificationService::new(self.db, self.realtime);
        let mut sent = 0;
        for booking in candidates {
            let scheduled = booking.scheduled_date.and_time(booking.scheduled_time).and_utc();
            if scheduled < now || scheduled > window_end {
                continue;
            }

            let message = format!(
                "Reminder: booking #{} is scheduled for {} at {}, {}.",
                booking.id,
                booking.scheduled_date,
                booking.scheduled_time.format("%H:%M"),
                booking.address
            );

            let recipients = std::iter::once(booking.house_owner_id).chain(booking.technician_id);
            for recipient_id in recipients {
                notifications
                    .notify(
                        CreateNotificationParams::new(
                            recipient_id,
                            NotificationKind::BookingReminder,
                            "Upcoming booking",
                            message.clone(),
                        )
                        .for_booking(booking.id),
                    )
                    .await;
            }

            repo.mark_reminder_sent(booking.id).await?;
            sent += 1;
        }

        Ok(sent)
    }
}
