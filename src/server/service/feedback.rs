//! Feedback service.
//!
//! House owners leave one feedback per completed booking. Completing a booking records
//! an auto-generated full-marks feedback which the owner's own feedback replaces. New
//! feedback awaits moderation; only published feedback is public.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{booking::BookingRepository, feedback::FeedbackRepository, is_unique_violation},
    error::{auth::AuthError, internal::InternalError, AppError},
    model::{
        booking::BookingStatus,
        feedback::{
            validate_ratings, CreateFeedbackParams, Feedback, FeedbackStatus, PaginatedFeedback,
            RatingSummary, SubmitFeedbackParams,
        },
        notification::{CreateNotificationParams, NotificationKind},
        parse_stored, total_pages,
        user::User,
    },
    service::{notification::NotificationService, realtime::RealtimeHub},
};

pub struct FeedbackService<'a> {
    db: &'a DatabaseConnection,
    realtime: &'a RealtimeHub,
}

impl<'a> FeedbackService<'a> {
    pub fn new(db: &'a DatabaseConnection, realtime: &'a RealtimeHub) -> Self {
        Self { db, realtime }
    }

    /// Records the owner's feedback for a completed booking.
    ///
    /// Replaces auto-generated feedback if present. Admins are notified.
    ///
    /// # Returns
    /// - `Ok(Feedback)` - Stored feedback, pending moderation
    /// - `Err(AppError::BadRequest)` - Rating out of range or booking not completed
    /// - `Err(AppError::NotFound)` - Booking not found
    /// - `Err(AppError::AuthErr)` - Booking belongs to someone else
    /// - `Err(AppError::Conflict)` - Owner already left feedback for this booking
    pub async fn create(
        &self,
        owner: &User,
        params: SubmitFeedbackParams,
    ) -> Result<Feedback, AppError> {
        validate_ratings(params.rating, &params.categories)?;

        let booking = BookingRepository::new(self.db)
            .find_by_id(params.booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;
        if booking.house_owner_id != owner.id {
            return Err(AuthError::AccessDenied(
                owner.id,
                format!("User does not own booking {}", booking.id),
            )
            .into());
        }
        let status: BookingStatus = parse_stored("booking status", &booking.status)?;
        if status != BookingStatus::Completed {
            return Err(AppError::BadRequest(
                "Feedback can only be left for completed bookings".to_string(),
            ));
        }

        let new_feedback = CreateFeedbackParams {
            booking_id: booking.id,
            house_owner_id: booking.house_owner_id,
            technician_id: booking.technician_id,
            service_id: booking.service_id,
            rating: params.rating,
            categories: params.categories,
            comment: params.comment,
            is_auto_generated: false,
            status: FeedbackStatus::Pending,
        };

        let repo = FeedbackRepository::new(self.db);
        let model = if repo.exists_for_booking(booking.id).await? {
            if !repo.replace_auto_generated(new_feedback).await? {
                return Err(already_submitted());
            }
            repo.find_by_booking(booking.id)
                .await?
                .ok_or_else(|| missing_after_write("feedback for booking", booking.id))?
        } else {
            match repo.create(new_feedback).await {
                Ok(model) => model,
                Err(e) if is_unique_violation(&e) => return Err(already_submitted()),
                Err(e) => return Err(e.into()),
            }
        };
        let feedback = Feedback::from_entity(model)?;

        tracing::info!(
            feedback_id = feedback.id,
            booking_id = feedback.booking_id,
            rating = feedback.rating,
            "Feedback submitted"
        );

        NotificationService::new(self.db, self.realtime)
            .notify_admins(
                CreateNotificationParams::new(
                    0,
                    NotificationKind::FeedbackReceived,
                    "New feedback",
                    format!(
                        "{} rated booking #{} {} out of 5.",
                        owner.name, feedback.booking_id, feedback.rating
                    ),
                )
                .for_booking(feedback.booking_id),
            )
            .await;

        Ok(feedback)
    }

    pub async fn get_paginated(
        &self,
        status: Option<FeedbackStatus>,
        page: u64,
        per_page: u64,
    ) -> Result<PaginatedFeedback, AppError> {
        let (rows, total) = FeedbackRepository::new(self.db)
            .get_paginated(status, page, per_page)
            .await?;

        let feedback = rows
            .into_iter()
            .map(Feedback::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PaginatedFeedback {
            feedback,
            total,
            page,
            per_page,
            total_pages: total_pages(total, per_page),
        })
    }

    /// Published feedback for a technician with their rating summary.
    pub async fn get_for_technician(
        &self,
        technician_id: i32,
    ) -> Result<(RatingSummary, Vec<Feedback>), AppError> {
        let feedback = FeedbackRepository::new(self.db)
            .get_published_by_technician(technician_id)
            .await?
            .into_iter()
            .map(Feedback::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((RatingSummary::from_feedback(technician_id, &feedback), feedback))
    }

    /// Feedback for a booking, visible to its participants and admins.
    pub async fn get_for_booking(
        &self,
        actor: &User,
        booking_id: i32,
    ) -> Result<Feedback, AppError> {
        let booking = BookingRepository::new(self.db)
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        let participant =
            booking.house_owner_id == actor.id || booking.technician_id == Some(actor.id);
        if !actor.is_admin() && !participant {
            return Err(AuthError::AccessDenied(
                actor.id,
                format!("User is not a participant of booking {}", booking_id),
            )
            .into());
        }

        let model = FeedbackRepository::new(self.db)
            .find_by_booking(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("No feedback for this booking".to_string()))?;

        Feedback::from_entity(model)
    }

    /// Stores an admin response and notifies the owner.
    pub async fn respond(
        &self,
        admin: &User,
        id: i32,
        message: String,
    ) -> Result<Feedback, AppError> {
        let message = message.trim().to_string();
        if message.is_empty() {
            return Err(AppError::BadRequest("Response message is required".to_string()));
        }

        let repo = FeedbackRepository::new(self.db);
        if !repo.respond(id, message, admin.id).await? {
            return Err(feedback_not_found());
        }
        let feedback = Feedback::from_entity(
            repo.find_by_id(id)
                .await?
                .ok_or_else(|| missing_after_write("feedback", id))?,
        )?;

        NotificationService::new(self.db, self.realtime)
            .notify(
                CreateNotificationParams::new(
                    feedback.house_owner_id,
                    NotificationKind::FeedbackResponse,
                    "Response to your feedback",
                    "An admin replied to your feedback.",
                )
                .for_booking(feedback.booking_id),
            )
            .await;

        Ok(feedback)
    }

    pub async fn set_status(&self, id: i32, status: FeedbackStatus) -> Result<Feedback, AppError> {
        let repo = FeedbackRepository::new(self.db);
        if !repo.set_status(id, status).await? {
            return Err(feedback_not_found());
        }

        tracing::info!(feedback_id = id, status = status.as_str(), "Feedback moderated");

        Feedback::from_entity(
            repo.find_by_id(id)
                .await?
                .ok_or_else(|| missing_after_write("feedback", id))?,
        )
    }
}

fn feedback_not_found() -> AppError {
    AppError::NotFound("Feedback not found".to_string())
}

fn missing_after_write(entity: &'static str, id: i32) -> AppError {
    InternalError::MissingAfterWrite { entity, id }.into()
}

fn already_submitted() -> AppError {
    AppError::Conflict("Feedback has already been submitted for this booking".to_string())
}
