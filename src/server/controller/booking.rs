use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{
        api::ErrorDto,
        booking::{
            AssignTechnicianDto, BookingDto, BookingStatsDto, CancelBookingDto, CreateBookingDto,
            PaginatedBookingsDto, UpdateBookingStatusDto,
        },
    },
    server::{
        controller::PaginationParams,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::booking::{BookingStatus, CreateBookingParams},
        service::booking::BookingService,
        state::AppState,
    },
};

/// Tag for grouping booking endpoints in OpenAPI documentation
pub static BOOKING_TAG: &str = "booking";

#[derive(Deserialize)]
pub struct BookingFilterParams {
    pub status: Option<String>,
}

/// Create a booking.
///
/// Reserves the selected inventory in the same transaction as the booking insert, so
/// either the booking exists with its stock taken or nothing changes. Admins are
/// notified of the new booking and of any item that drops to its reorder level.
///
/// # Access Control
/// - `HouseOwner` - Only house owners can book services
///
/// # Returns
/// - `201 Created` - Booking created with inventory reserved
/// - `400 Bad Request` - Invalid date, time or address, inactive item, or insufficient stock
/// - `404 Not Found` - Service or inventory item does not exist
#[utoipa::path(
    post,
    path = "/api/bookings",
    tag = BOOKING_TAG,
    security(("bearer" = [])),
    request_body = CreateBookingDto,
    responses(
        (status = 201, description = "Booking created", body = BookingDto),
        (status = 400, description = "Invalid booking data or insufficient stock", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a house owner", body = ErrorDto),
        (status = 404, description = "Service or inventory item not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateBookingDto>,
) -> Result<impl IntoResponse, AppError> {
    let owner = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::HouseOwner])
        .await?;

    let params = CreateBookingParams::from_dto(payload, owner.id)?;
    let booking = BookingService::new(&state.db, &state.realtime)
        .create(params)
        .await?;

    Ok((StatusCode::CREATED, Json(booking.into_dto())))
}

/// List bookings visible to the caller.
///
/// Admins see every booking, house owners their own and technicians those assigned to
/// them. Newest first.
#[utoipa::path(
    get,
    path = "/api/bookings",
    tag = BOOKING_TAG,
    security(("bearer" = [])),
    params(
        ("status" = Option<String>, Query, description = "Filter by booking status"),
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10)")
    ),
    responses(
        (status = 200, description = "Page of bookings", body = PaginatedBookingsDto),
        (status = 400, description = "Unknown status filter", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_bookings(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(filter): Query<BookingFilterParams>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let status = filter
        .status
        .as_deref()
        .map(str::parse::<BookingStatus>)
        .transpose()?;
    let bookings = BookingService::new(&state.db, &state.realtime)
        .get_paginated(&user, status, params.page(), params.entries())
        .await?;

    Ok((StatusCode::OK, Json(bookings.into_dto())))
}

/// Booking counts per status and revenue from paid bookings.
#[utoipa::path(
    get,
    path = "/api/bookings/stats",
    tag = BOOKING_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Booking statistics", body = BookingStatsDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_booking_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let stats = BookingService::new(&state.db, &state.realtime)
        .stats()
        .await?;

    Ok((StatusCode::OK, Json(stats.into_dto())))
}

/// Get a booking with its line items.
///
/// # Access Control
/// - `Admin` - Any booking
/// - House owner or assigned technician - Their own bookings
#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    tag = BOOKING_TAG,
    security(("bearer" = [])),
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking details", body = BookingDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not a participant", body = ErrorDto),
        (status = 404, description = "Booking not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let booking = BookingService::new(&state.db, &state.realtime)
        .get_for_user(&user, id)
        .await?;

    Ok((StatusCode::OK, Json(booking.into_dto())))
}

/// Assign a technician to a pending or accepted booking.
#[utoipa::path(
    put,
    path = "/api/bookings/{id}/assign",
    tag = BOOKING_TAG,
    security(("bearer" = [])),
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    request_body = AssignTechnicianDto,
    responses(
        (status = 200, description = "Technician assigned", body = BookingDto),
        (status = 400, description = "Booking not assignable or user is not an active technician", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Booking or technician not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn assign_technician(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<AssignTechnicianDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let booking = BookingService::new(&state.db, &state.realtime)
        .assign_technician(id, payload.technician_id)
        .await?;

    Ok((StatusCode::OK, Json(booking.into_dto())))
}

/// Move a booking to a new status.
///
/// # Access Control
/// - `Admin` - Accept, reject, and any other allowed transition
/// - Assigned technician - Start and complete work
/// - House owner - Cancel while pending or accepted
///
/// # Returns
/// - `200 OK` - Status changed
/// - `400 Bad Request` - Transition not allowed from the current status
/// - `403 Forbidden` - Caller may not perform this transition
/// - `409 Conflict` - Booking changed concurrently
#[utoipa::path(
    put,
    path = "/api/bookings/{id}/status",
    tag = BOOKING_TAG,
    security(("bearer" = [])),
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    request_body = UpdateBookingStatusDto,
    responses(
        (status = 200, description = "Status updated", body = BookingDto),
        (status = 400, description = "Transition not allowed", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller may not perform this transition", body = ErrorDto),
        (status = 404, description = "Booking not found", body = ErrorDto),
        (status = 409, description = "Booking changed concurrently", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_booking_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateBookingStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let target: BookingStatus = payload.status.parse()?;
    let booking = BookingService::new(&state.db, &state.realtime)
        .update_status(&user, id, target, payload.reason)
        .await?;

    Ok((StatusCode::OK, Json(booking.into_dto())))
}

/// Cancel a booking and return its reserved inventory to stock.
///
/// House owners may cancel their own bookings while pending or accepted; admins may
/// cancel any booking that has not reached a terminal status.
#[utoipa::path(
    put,
    path = "/api/bookings/{id}/cancel",
    tag = BOOKING_TAG,
    security(("bearer" = [])),
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    request_body = CancelBookingDto,
    responses(
        (status = 200, description = "Booking cancelled", body = BookingDto),
        (status = 400, description = "Booking can no longer be cancelled", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not the owner or an admin", body = ErrorDto),
        (status = 404, description = "Booking not found", body = ErrorDto),
        (status = 409, description = "Booking changed concurrently", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn cancel_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<CancelBookingDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let booking = BookingService::new(&state.db, &state.realtime)
        .cancel(&user, id, payload.reason)
        .await?;

    Ok((StatusCode::OK, Json(booking.into_dto())))
}
