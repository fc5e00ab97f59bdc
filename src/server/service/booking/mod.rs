//! Booking service.
//!
//! Owns the booking lifecycle: creation with inventory reservation, technician
//! assignment, status transitions with their per-role rules, cancellation and
//! completion. Every multi-row write runs in a single transaction; notifications are
//! sent only after the transaction commits.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::booking::BookingRepository,
    error::{auth::AuthError, AppError},
    model::{
        booking::{Booking, BookingScope, BookingStats, BookingStatus, PaginatedBookings},
        parse_stored, total_pages,
        user::{Role, User},
    },
    service::realtime::RealtimeHub,
};

pub mod assign;
pub mod create;
pub mod reminder;
pub mod transition;

pub struct BookingService<'a> {
    db: &'a DatabaseConnection,
    realtime: &'a RealtimeHub,
}

impl<'a> BookingService<'a> {
    pub fn new(db: &'a DatabaseConnection, realtime: &'a RealtimeHub) -> Self {
        Self { db, realtime }
    }

    /// Loads a booking with its related names and line items.
    ///
    /// # Returns
    /// - `Ok(Booking)` - Booking found
    /// - `Err(AppError::NotFound)` - No booking with that id
    pub async fn get_by_id(&self, id: i32) -> Result<Booking, AppError> {
        let relations = BookingRepository::new(self.db)
            .get_by_id(id)
            .await?
            .ok_or_else(booking_not_found)?;

        Booking::from_with_relations(relations)
    }

    /// Loads a booking the actor is allowed to see: admins see every booking, other
    /// users only bookings they own or are assigned to.
    pub async fn get_for_user(&self, actor: &User, id: i32) -> Result<Booking, AppError> {
        let booking = self.get_by_id(id).await?;

        if !actor.is_admin() && !booking.is_participant(actor.id) {
            return Err(AuthError::AccessDenied(
                actor.id,
                format!("User is not a participant of booking {}", id),
            )
            .into());
        }

        Ok(booking)
    }

    /// Lists bookings visible to the actor, newest first.
    ///
    /// Admins see all bookings, technicians their assigned bookings and house owners
    /// their own.
    pub async fn get_paginated(
        &self,
        actor: &User,
        status: Option<BookingStatus>,
        page: u64,
        per_page: u64,
    ) -> Result<PaginatedBookings, AppError> {
        let scope = match actor.role {
            Role::Admin => BookingScope::All,
            Role::Technician => BookingScope::Technician(actor.id),
            Role::HouseOwner => BookingScope::HouseOwner(actor.id),
        };

        let (rows, total) = BookingRepository::new(self.db)
            .get_paginated(scope, status, page, per_page)
            .await?;

        let bookings = rows
            .into_iter()
            .map(Booking::from_with_relations)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PaginatedBookings {
            bookings,
            total,
            page,
            per_page,
            total_pages: total_pages(total, per_page),
        })
    }

    pub async fn stats(&self) -> Result<BookingStats, AppError> {
        Ok(BookingRepository::new(self.db).stats().await?)
    }

    /// Loads the raw booking row together with its parsed status.
    async fn load_row(
        &self,
        id: i32,
    ) -> Result<(entity::booking::Model, BookingStatus), AppError> {
        let booking = BookingRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(booking_not_found)?;
        let status = parse_stored("booking status", &booking.status)?;

        Ok((booking, status))
    }
}

fn booking_not_found() -> AppError {
    AppError::NotFound("Booking not found".to_string())
}

/// The booking changed status between our read and our write.
fn concurrent_change() -> AppError {
    AppError::Conflict("Booking was updated by someone else, please reload".to_string())
}
